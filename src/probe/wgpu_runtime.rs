use super::{AcceleratorAllocation, AcceleratorRuntime, DeviceInfo};
use crate::ProbeError;
use burn::backend::wgpu::{Wgpu, WgpuDevice};
use burn::tensor::{Tensor, TensorData};
use wgpu::{Backends, DeviceType};

/// Accelerators reachable through the Burn wgpu backend.
///
/// Only discrete and integrated GPUs count as accelerators; software rasterizers and CPU
/// adapters are ignored.
pub struct WgpuRuntime {
    devices: Vec<(DeviceInfo, WgpuDevice)>,
}

impl WgpuRuntime {
    /// Enumerate the adapters of the graphics API selected by the Burn wgpu backend.
    pub fn new() -> Self {
        let instance = wgpu::Instance::default();
        let adapters: Vec<_> = instance
            .enumerate_adapters(auto_graphics_api())
            .into_iter()
            .map(|adapter| {
                let info = adapter.get_info();
                log::debug!("Found adapter {info:?}");
                (info.name, info.device_type)
            })
            .collect();

        Self {
            devices: assign_devices(adapters),
        }
    }
}

/// Graphics API the Burn wgpu backend picks when none is specified.
fn auto_graphics_api() -> Backends {
    if cfg!(target_os = "macos") {
        Backends::METAL
    } else {
        Backends::VULKAN
    }
}

/// Map adapters, in enumeration order, to Burn devices.
///
/// Burn numbers discrete and integrated GPUs separately, in the order the graphics API
/// enumerates them. Identical GPUs are distinct devices.
fn assign_devices(
    adapters: impl IntoIterator<Item = (String, DeviceType)>,
) -> Vec<(DeviceInfo, WgpuDevice)> {
    let mut num_discrete = 0;
    let mut num_integrated = 0;
    let mut devices = Vec::new();

    for (name, device_type) in adapters {
        let device = match device_type {
            DeviceType::DiscreteGpu => {
                num_discrete += 1;
                WgpuDevice::DiscreteGpu(num_discrete - 1)
            }
            DeviceType::IntegratedGpu => {
                num_integrated += 1;
                WgpuDevice::IntegratedGpu(num_integrated - 1)
            }
            _ => continue,
        };

        let index = devices.len();
        devices.push((DeviceInfo::new(index, name, format!("{device_type:?}")), device));
    }

    devices
}

impl Default for WgpuRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl AcceleratorRuntime for WgpuRuntime {
    fn name(&self) -> &'static str {
        "wgpu"
    }

    fn devices(&self) -> Vec<DeviceInfo> {
        self.devices.iter().map(|(info, _)| info.clone()).collect()
    }

    fn allocate(
        &self,
        device: &DeviceInfo,
        data: TensorData,
    ) -> Result<AcceleratorAllocation, ProbeError> {
        let (_, wgpu_device) = self
            .devices
            .iter()
            .find(|(info, _)| info.index == device.index)
            .ok_or(ProbeError::DeviceUnavailable(device.index))?;

        let tensor = Tensor::<Wgpu, 2>::from_data(data, wgpu_device);
        // Reading the data back forces the upload and the kernel queue to complete.
        let data = tensor.into_data();

        Ok(AcceleratorAllocation::new(
            data.shape,
            format!("{wgpu_device:?}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_gpus_should_be_distinct_devices() {
        let devices = assign_devices([
            ("NVIDIA A100".to_string(), DeviceType::DiscreteGpu),
            ("llvmpipe".to_string(), DeviceType::Cpu),
            ("Intel UHD".to_string(), DeviceType::IntegratedGpu),
            ("NVIDIA A100".to_string(), DeviceType::DiscreteGpu),
        ]);

        let names: Vec<&str> = devices.iter().map(|(info, _)| info.name.as_str()).collect();
        assert_eq!(names, vec!["NVIDIA A100", "Intel UHD", "NVIDIA A100"]);

        let indices: Vec<usize> = devices.iter().map(|(info, _)| info.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        let burn_devices: Vec<WgpuDevice> =
            devices.into_iter().map(|(_, device)| device).collect();
        assert_eq!(
            burn_devices,
            vec![
                WgpuDevice::DiscreteGpu(0),
                WgpuDevice::IntegratedGpu(0),
                WgpuDevice::DiscreteGpu(1),
            ]
        );
    }

    #[test]
    fn cpu_and_virtual_adapters_are_not_accelerators() {
        let devices = assign_devices([
            ("llvmpipe".to_string(), DeviceType::Cpu),
            ("virtio".to_string(), DeviceType::VirtualGpu),
            ("unknown".to_string(), DeviceType::Other),
        ]);

        assert!(devices.is_empty());
    }
}
