//! Environment sanity check.
//!
//! Reports the tensor framework version and the accelerators visible to the process, then
//! makes sure a tensor can be allocated on the CPU and, when possible, copied to an
//! accelerator.

mod runtime;
#[cfg(feature = "wgpu")]
mod wgpu_runtime;

pub use runtime::*;
#[cfg(feature = "wgpu")]
pub use wgpu_runtime::WgpuRuntime;

use crate::ProbeError;
use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::tensor::{Distribution, Tensor, TensorData};
use core::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Version of the Burn framework this crate is built against.
///
/// Must match the `burn` requirement in `Cargo.toml`.
pub const FRAMEWORK_VERSION: &str = "0.19";

/// Shape of the tensors allocated by the sanity check.
pub const PROBE_SHAPE: [usize; 2] = [3, 3];

type CpuBackend = NdArray<f32>;

/// What the process can see of its compute environment.
#[derive(Debug, Clone)]
pub struct EnvironmentReport {
    /// Version of the tensor framework.
    pub framework_version: &'static str,
    /// Name of the accelerator runtime that was queried.
    pub runtime: &'static str,
    /// Enumerated accelerators, in runtime order.
    pub devices: Vec<DeviceInfo>,
}

impl EnvironmentReport {
    /// Query the framework and the accelerator runtime.
    pub fn collect<R: AcceleratorRuntime>(runtime: &R) -> Self {
        let devices = runtime.devices();
        log::debug!(
            "Runtime {} reported {} accelerator(s)",
            runtime.name(),
            devices.len()
        );

        Self {
            framework_version: FRAMEWORK_VERSION,
            runtime: runtime.name(),
            devices,
        }
    }

    pub fn accelerator_available(&self) -> bool {
        !self.devices.is_empty()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|device| device.name.as_str()).collect()
    }
}

impl fmt::Display for EnvironmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Burn Sanity Check ===")?;
        writeln!(f, "Burn version: {}", self.framework_version)?;
        writeln!(f, "Accelerator available: {}", self.accelerator_available())?;

        if self.accelerator_available() {
            writeln!(f, "Accelerator runtime: {}", self.runtime)?;
            writeln!(f, "Number of accelerator devices: {}", self.device_count())?;
            for device in self.devices.iter() {
                writeln!(f, "  Device {}: {}", device.index, device.name)?;
            }
        } else {
            writeln!(f, "No accelerator devices found")?;
        }

        Ok(())
    }
}

/// Outcome of the tensor allocation checks.
#[derive(Debug, Clone)]
pub struct TensorCheck {
    pub cpu_shape: Vec<usize>,
    pub accelerator: Option<AcceleratorAllocation>,
}

/// Allocate a random tensor on the CPU and copy it to the first accelerator, if any.
///
/// Tensor backends signal failures by panicking; those panics are caught here and returned
/// as [ProbeError::TensorOp]. The first failure aborts the check.
pub fn check_tensor_ops<R: AcceleratorRuntime>(
    runtime: &R,
    report: &EnvironmentReport,
) -> Result<TensorCheck, ProbeError> {
    let cpu = catch_tensor_op(random_cpu_data)?;
    let cpu_shape = cpu.shape.clone();
    log::debug!("CPU tensor created: {cpu_shape:?}");

    let accelerator = match report.devices.first() {
        Some(device) => {
            let data = catch_tensor_op(random_cpu_data)?;
            let allocation =
                catch_tensor_op(AssertUnwindSafe(|| runtime.allocate(device, data)))??;
            log::debug!(
                "Accelerator tensor created: {:?} on {}",
                allocation.shape,
                allocation.device
            );
            Some(allocation)
        }
        None => None,
    };

    Ok(TensorCheck {
        cpu_shape,
        accelerator,
    })
}

fn random_cpu_data() -> TensorData {
    Tensor::<CpuBackend, 2>::random(
        PROBE_SHAPE,
        Distribution::Normal(0.0, 1.0),
        &NdArrayDevice::Cpu,
    )
    .into_data()
}

fn catch_tensor_op<T, F>(op: F) -> Result<T, ProbeError>
where
    F: FnOnce() -> T + panic::UnwindSafe,
{
    panic::catch_unwind(op).map_err(|payload| {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic in tensor runtime".to_string()
        };
        ProbeError::TensorOp(message)
    })
}

/// Full sanity check: environment queries followed by the tensor checks.
#[derive(Debug)]
pub struct SanityCheck {
    pub environment: EnvironmentReport,
    pub tensors: Result<TensorCheck, ProbeError>,
}

impl SanityCheck {
    /// Run every check against the given accelerator runtime.
    ///
    /// Environment queries are not guarded: a failure there is a bug in the runtime and is
    /// left to abort the process.
    pub fn run<R: AcceleratorRuntime>(runtime: &R) -> Self {
        let environment = EnvironmentReport::collect(runtime);
        let tensors = check_tensor_ops(runtime, &environment);

        if let Err(err) = &tensors {
            log::error!("Sanity check failed: {err}");
        }

        Self {
            environment,
            tensors,
        }
    }

    pub fn passed(&self) -> bool {
        self.tensors.is_ok()
    }

    /// Process exit code: `0` when every tensor operation succeeded, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for SanityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.environment)?;
        writeln!(f)?;
        writeln!(f, "=== Testing Tensor Operations ===")?;

        match &self.tensors {
            Ok(check) => {
                writeln!(f, "CPU tensor created: {:?}", check.cpu_shape)?;
                if let Some(allocation) = &check.accelerator {
                    writeln!(f, "Accelerator tensor created: {:?}", allocation.shape)?;
                    writeln!(f, "Accelerator tensor device: {}", allocation.device)?;
                }
                writeln!(f, "All sanity checks passed!")
            }
            Err(err) => writeln!(f, "Error during tensor operations: {err}"),
        }
    }
}
