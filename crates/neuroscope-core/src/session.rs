//! Device discovery and session seams.
//!
//! Backends implement [`DeviceLocator`] for enumeration and open, and
//! [`DeviceSession`] for the callback-driven read transport.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bridge::ReadCallback;
use crate::error::OpenError;

/// Identity of a discovered device, enough to open it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceHandle {
    pub vendor_id: u16,
    pub product_id: u16,
    pub usage_page: u16,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub path: String,
}

impl DeviceHandle {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            usage_page: 0,
            manufacturer: None,
            product_name: None,
            path: path.into(),
        }
    }

    pub fn with_usage_page(mut self, usage_page: u16) -> Self {
        self.usage_page = usage_page;
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

/// An open device that can perform single-shot input reads.
///
/// Dropping the session releases the device.
pub trait DeviceSession: Send + Sync {
    /// Start one read. `on_done` is invoked at most once, possibly from
    /// another thread, with the report or the transport error. A session
    /// that cannot start the read invokes it with an error instead.
    fn request_read(&self, on_done: ReadCallback);

    /// Whether the session can still serve reads.
    fn is_usable(&self) -> bool;
}

impl<T> DeviceSession for Arc<T>
where
    T: DeviceSession + ?Sized,
{
    fn request_read(&self, on_done: ReadCallback) {
        (**self).request_read(on_done);
    }

    fn is_usable(&self) -> bool {
        (**self).is_usable()
    }
}

/// Enumerates devices and opens sessions on them.
pub trait DeviceLocator {
    type Session: DeviceSession;

    /// All devices currently visible to the backend.
    fn devices(&self) -> Vec<DeviceHandle>;

    /// First device matching the vendor/product pair.
    fn find_device(&self, vendor_id: u16, product_id: u16) -> Option<DeviceHandle> {
        self.devices()
            .into_iter()
            .find(|device| device.matches(vendor_id, product_id))
    }

    fn open(&self, handle: &DeviceHandle) -> Result<Self::Session, OpenError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_handle_matches() {
        let handle = DeviceHandle::new(0x049A, 0x0005, "/dev/hidraw0");
        assert!(handle.matches(0x049A, 0x0005));
        assert!(!handle.matches(0x049A, 0x0006));
    }

    #[test]
    fn test_device_handle_display_name() {
        let handle = DeviceHandle::new(0x049A, 0x0005, "/dev/hidraw0").with_product_name("Scope");
        assert_eq!(handle.display_name(), "Scope");

        let handle = DeviceHandle::new(0x049A, 0x0005, "/dev/hidraw0").with_manufacturer("Acme");
        assert_eq!(handle.display_name(), "Acme");

        let handle = DeviceHandle::new(0x049A, 0x0005, "/dev/hidraw0");
        assert_eq!(handle.display_name(), "049a:0005");
    }
}
