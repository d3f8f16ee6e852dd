use engine_logging::{engine_debug, engine_warn};
use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;

use crate::DeviceError;

/// Counts the compute devices visible to this host.
pub trait DeviceInventory: Send + Sync {
    fn count(&self) -> Result<u32, DeviceError>;
}

/// Fixed device count, for hosts where enumeration is stubbed out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedInventory(pub u32);

impl DeviceInventory for FixedInventory {
    fn count(&self) -> Result<u32, DeviceError> {
        Ok(self.0)
    }
}

/// NVIDIA device inventory backed by NVML.
///
/// NVML keeps process-wide state, so the handle is created once with
/// [`NvmlInventory::init`] and shut down when dropped. Hosts without the NVML
/// library or kernel driver get an inventory that reports zero devices.
pub struct NvmlInventory {
    nvml: Option<Nvml>,
}

impl NvmlInventory {
    pub fn init() -> Result<Self, DeviceError> {
        match Nvml::init() {
            Ok(nvml) => {
                engine_debug!("NVML initialized");
                Ok(Self { nvml: Some(nvml) })
            }
            Err(err) if driver_absent(&err) => {
                engine_warn!("NVML unavailable, reporting no devices: {}", err);
                Ok(Self { nvml: None })
            }
            Err(err) => Err(DeviceError::Init(err.to_string())),
        }
    }

    /// True when a live NVML handle backs this inventory.
    pub fn is_available(&self) -> bool {
        self.nvml.is_some()
    }
}

impl DeviceInventory for NvmlInventory {
    fn count(&self) -> Result<u32, DeviceError> {
        match &self.nvml {
            Some(nvml) => nvml
                .device_count()
                .map_err(|e| DeviceError::Query(e.to_string())),
            None => Ok(0),
        }
    }
}

fn driver_absent(err: &NvmlError) -> bool {
    matches!(
        err,
        NvmlError::LibloadingError(_) | NvmlError::LibraryNotFound | NvmlError::DriverNotLoaded
    )
}
