// Logical device - application handle to the selected GPU
//
// One queue from one graphics-capable family, no optional features, no
// device extensions. The instance's layers are repeated here for loaders
// that still read device layers.

use super::driver::{DeviceRequest, Driver};
use super::error::{BootstrapError, BootstrapResult, VulkanObject};
use super::instance::Instance;
use super::physical::SelectedDevice;
use ash::vk;
use std::rc::Rc;

const QUEUE_PRIORITIES: [f32; 1] = [1.0];

/// Logical device wrapper, destroyed on drop
pub struct LogicalDevice<D: Driver> {
    raw: D::Device,
    pub graphics_queue: vk::Queue,
    pub graphics_queue_family: u32,
    driver: Rc<D>,
}

impl<D: Driver> LogicalDevice<D> {
    pub fn new(instance: &Instance<D>, selected: &SelectedDevice) -> BootstrapResult<Self> {
        let driver = instance.driver().clone();

        let request = DeviceRequest {
            queue_family: selected.graphics_family,
            queue_priorities: &QUEUE_PRIORITIES,
            features: vk::PhysicalDeviceFeatures::default(),
            layers: instance.layers(),
        };

        let raw = driver
            .create_device(instance.raw(), selected.handle, &request)
            .map_err(BootstrapError::creation(VulkanObject::LogicalDevice))?;

        let graphics_queue = driver.device_queue(&raw, selected.graphics_family, 0);
        log::info!(
            "Created logical device on {} (graphics family {})",
            selected.name,
            selected.graphics_family
        );

        Ok(Self {
            raw,
            graphics_queue,
            graphics_queue_family: selected.graphics_family,
            driver,
        })
    }

    /// Wait for device to be idle (e.g., before cleanup)
    pub fn wait_idle(&self) -> BootstrapResult<()> {
        self.driver
            .wait_idle(&self.raw)
            .map_err(BootstrapError::query("device idle"))
    }
}

impl<D: Driver> Drop for LogicalDevice<D> {
    fn drop(&mut self) {
        log::debug!("Destroying logical device");
        self.driver.destroy_device(&self.raw);
    }
}
