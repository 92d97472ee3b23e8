// Physical device selection
//
// First-fit: devices are checked in enumeration order and the first one with
// a graphics-capable queue family wins. No scoring, no software fallback.

use super::driver::Driver;
use super::error::{BootstrapError, BootstrapResult};
use ash::vk;

/// Result of searching a device's queue families for graphics support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsFamily {
    Found(u32),
    NotFound,
}

impl GraphicsFamily {
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// First queue family (lowest index) whose flags include GRAPHICS.
pub fn find_graphics_family(families: &[vk::QueueFamilyProperties]) -> GraphicsFamily {
    families
        .iter()
        .position(|family| family.queue_flags.contains(vk::QueueFlags::GRAPHICS))
        .map_or(GraphicsFamily::NotFound, |index| GraphicsFamily::Found(index as u32))
}

/// The GPU chosen for the logical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDevice {
    pub handle: vk::PhysicalDevice,
    pub graphics_family: u32,
    pub name: String,
}

pub fn pick_physical_device<D: Driver>(
    driver: &D,
    instance: &D::Instance,
) -> BootstrapResult<SelectedDevice> {
    let devices = driver
        .physical_devices(instance)
        .map_err(BootstrapError::query("physical devices"))?;

    if devices.is_empty() {
        return Err(BootstrapError::NoDevices);
    }

    for &device in &devices {
        let name = driver.device_name(instance, device);
        let family = find_graphics_family(&driver.queue_families(instance, device));

        if !family.is_complete() {
            log::debug!("Skipping {}: no graphics queue family", name);
            continue;
        }
        if let GraphicsFamily::Found(graphics_family) = family {
            log::info!("Selected GPU: {}", name);
            return Ok(SelectedDevice {
                handle: device,
                graphics_family,
                name,
            });
        }
    }

    Err(BootstrapError::NoSuitableDevice {
        candidates: devices.len(),
    })
}
