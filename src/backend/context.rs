// GPU context - the bootstrap sequence
//
// instance → debug messenger (validation only) → physical device → logical
// device. Each handle lives in its own guard; an early `?` drops the guards
// already built in reverse order, and a finished context drops its fields
// in declaration order (device, messenger, instance).

use super::debug::DebugMessenger;
use super::device::LogicalDevice;
use super::driver::Driver;
use super::error::BootstrapResult;
use super::instance::Instance;
use super::physical::{self, SelectedDevice};
use crate::lifecycle::{Lifecycle, Stage};
use ash::vk;
use std::ffi::CString;
use std::rc::Rc;

/// Immutable bootstrap configuration, built once from `Config`.
#[derive(Debug, Clone)]
pub struct ContextSettings {
    pub app_name: CString,
    pub app_version: u32,
    pub engine_name: CString,
    pub engine_version: u32,
    pub api_version: u32,
    pub enable_validation: bool,
    pub validation_layers: Vec<CString>,
}

/// Field order matters for Drop!
pub struct GpuContext<D: Driver> {
    device: LogicalDevice<D>,
    physical_device: SelectedDevice,
    messenger: Option<DebugMessenger<D>>,
    _instance: Instance<D>,
}

impl<D: Driver> GpuContext<D> {
    pub fn new(
        driver: Rc<D>,
        settings: &ContextSettings,
        window_extensions: &[CString],
        lifecycle: &mut Lifecycle,
    ) -> BootstrapResult<Self> {
        log::info!(
            "Initializing Vulkan (validation {})",
            if settings.enable_validation { "on" } else { "off" }
        );

        let instance = Instance::new(driver, settings, window_extensions)?;
        lifecycle.advance(Stage::InstanceReady);

        let messenger = if settings.enable_validation {
            let messenger = DebugMessenger::new(&instance)?;
            lifecycle.advance(Stage::MessengerReady);
            Some(messenger)
        } else {
            None
        };

        let physical_device =
            physical::pick_physical_device(instance.driver().as_ref(), instance.raw())?;
        lifecycle.advance(Stage::DeviceSelected);

        let device = LogicalDevice::new(&instance, &physical_device)?;
        lifecycle.advance(Stage::DeviceReady);

        log::info!("Vulkan initialized successfully!");
        Ok(Self {
            device,
            physical_device,
            messenger,
            _instance: instance,
        })
    }

    pub fn physical_device(&self) -> &SelectedDevice {
        &self.physical_device
    }

    pub fn device(&self) -> &LogicalDevice<D> {
        &self.device
    }

    pub fn graphics_queue(&self) -> vk::Queue {
        self.device.graphics_queue
    }

    pub fn has_messenger(&self) -> bool {
        self.messenger.is_some()
    }
}
