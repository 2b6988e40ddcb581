//! `neuroscope list`

use neuroscope_core::{Console, DeviceHandle, DeviceLocator};

pub fn list_devices<L>(locator: &L, console: &dyn Console)
where
    L: DeviceLocator + ?Sized,
{
    let devices = locator.devices();
    if devices.is_empty() {
        console.line("No HID devices found.");
        return;
    }
    console.line(&format!(
        "{:<8} {:<8} {:<12} {:<20} Product",
        "VID", "PID", "Usage Page", "Manufacturer"
    ));
    console.line(&"-".repeat(80));
    for device in &devices {
        console.line(&device_row(device));
    }
}

fn device_row(device: &DeviceHandle) -> String {
    let vid = format!("0x{:04X}", device.vendor_id);
    let pid = format!("0x{:04X}", device.product_id);
    let usage_page = format!("0x{:04X}", device.usage_page);
    format!(
        "{vid:<8} {pid:<8} {usage_page:<12} {:<20} {}",
        device.manufacturer.as_deref().unwrap_or("(unknown)"),
        device.product_name.as_deref().unwrap_or("(unknown)"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroscope_core::mock::{MockLocator, RecordingConsole};

    #[test]
    fn test_list_without_devices() {
        let console = RecordingConsole::new();
        list_devices(&MockLocator::new(), &console);
        assert_eq!(console.lines(), ["No HID devices found."]);
    }

    #[test]
    fn test_list_prints_header_and_rows() {
        let locator = MockLocator::new()
            .with_device(
                DeviceHandle::new(0x049A, 0x0005, "/dev/hidraw0")
                    .with_usage_page(0xFF00)
                    .with_manufacturer("Acme")
                    .with_product_name("Neuroscope"),
            )
            .with_device(DeviceHandle::new(0x046D, 0xC52B, "/dev/hidraw1"));
        let console = RecordingConsole::new();

        list_devices(&locator, &console);

        let lines = console.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines.first().is_some_and(|l| l.starts_with("VID")));
        assert_eq!(
            lines.get(2).map(String::as_str),
            Some("0x049A   0x0005   0xFF00       Acme                 Neuroscope")
        );
        assert!(lines.get(3).is_some_and(|l| l.ends_with("(unknown)")));
    }
}
