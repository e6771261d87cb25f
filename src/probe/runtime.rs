use crate::ProbeError;
use burn::tensor::TensorData;

/// An accelerator visible to the process.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Position of the device in the runtime enumeration.
    pub index: usize,
    /// Human readable device name, as reported by the driver.
    pub name: String,
    /// Kind of device (discrete GPU, integrated GPU, ...).
    pub kind: String,
}

/// A tensor that was successfully copied into accelerator memory.
#[derive(new, Debug, Clone)]
pub struct AcceleratorAllocation {
    pub shape: Vec<usize>,
    pub device: String,
}

/// Access to the accelerators of a compute runtime.
pub trait AcceleratorRuntime {
    /// Name of the runtime, used in reports.
    fn name(&self) -> &'static str;

    /// Enumerate the accelerators usable for tensor math.
    fn devices(&self) -> Vec<DeviceInfo>;

    /// Copy host data into the memory of the given accelerator and read its shape back.
    ///
    /// Implementations may panic when the underlying tensor runtime fails; callers are
    /// expected to guard this call.
    fn allocate(
        &self,
        device: &DeviceInfo,
        data: TensorData,
    ) -> Result<AcceleratorAllocation, ProbeError>;
}

/// Runtime used when the crate is built without accelerator support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAccelerator;

impl AcceleratorRuntime for NoAccelerator {
    fn name(&self) -> &'static str {
        "none"
    }

    fn devices(&self) -> Vec<DeviceInfo> {
        Vec::new()
    }

    fn allocate(
        &self,
        device: &DeviceInfo,
        _data: TensorData,
    ) -> Result<AcceleratorAllocation, ProbeError> {
        Err(ProbeError::DeviceUnavailable(device.index))
    }
}
