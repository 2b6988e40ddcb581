//! Device enumeration and open via `hidapi`

use hidapi::{DeviceInfo, HidApi};
use neuroscope_core::{DeviceHandle, DeviceLocator, MAX_REPORT_LENGTH, OpenError, ReaderError};
use tracing::debug;

use crate::session::HidSession;

pub struct HidApiLocator {
    api: HidApi,
}

impl HidApiLocator {
    /// Initialise `hidapi` and take a snapshot of connected devices.
    ///
    /// # Errors
    ///
    /// [`ReaderError::Backend`] if the HID library cannot be initialised.
    pub fn new() -> Result<Self, ReaderError> {
        let api = HidApi::new().map_err(|e| ReaderError::Backend(e.to_string()))?;
        debug!(devices = api.device_list().count(), "hidapi initialised");
        Ok(Self { api })
    }
}

fn handle_from_info(info: &DeviceInfo) -> DeviceHandle {
    let mut handle = DeviceHandle::new(
        info.vendor_id(),
        info.product_id(),
        info.path().to_string_lossy(),
    )
    .with_usage_page(info.usage_page());
    if let Some(manufacturer) = info.manufacturer_string() {
        handle = handle.with_manufacturer(manufacturer);
    }
    if let Some(product) = info.product_string() {
        handle = handle.with_product_name(product);
    }
    handle
}

impl DeviceLocator for HidApiLocator {
    type Session = HidSession;

    fn devices(&self) -> Vec<DeviceHandle> {
        self.api.device_list().map(handle_from_info).collect()
    }

    fn open(&self, handle: &DeviceHandle) -> Result<HidSession, OpenError> {
        let backend_error = |reason: String| OpenError::Backend {
            vendor_id: handle.vendor_id,
            product_id: handle.product_id,
            reason,
        };

        let info = self
            .api
            .device_list()
            .find(|info| info.path().to_string_lossy() == handle.path.as_str())
            .ok_or_else(|| backend_error("device is no longer enumerated".to_string()))?;

        let device = info
            .open_device(&self.api)
            .map_err(|e| backend_error(e.to_string()))?;
        debug!(path = %handle.path, "device opened");

        HidSession::spawn(device, handle.display_name(), MAX_REPORT_LENGTH)
            .map_err(|e| backend_error(format!("failed to start reader thread: {e}")))
    }
}
