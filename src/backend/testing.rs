// Recording fake driver for bootstrap tests
//
// Hands out integer handles, fails on demand and records every create,
// destroy and queue family query so ordering can be asserted.

use super::context::ContextSettings;
use super::driver::{DeviceRequest, Driver, EntryPoint, InstanceRequest, MessengerConfig};
use ash::prelude::VkResult;
use ash::vk::{self, Handle};
use std::cell::{Cell, RefCell};
use std::ffi::CString;
use std::mem::size_of;

pub fn cstrings(names: &[&str]) -> Vec<CString> {
    names
        .iter()
        .map(|name| CString::new(*name).unwrap())
        .collect()
}

/// Same values as the default config, with validation forced on or off.
pub fn settings(enable_validation: bool) -> ContextSettings {
    ContextSettings {
        app_name: c"Hello Triangle".to_owned(),
        app_version: vk::make_api_version(0, 1, 0, 0),
        engine_name: c"No Engine".to_owned(),
        engine_version: vk::make_api_version(0, 1, 0, 0),
        api_version: vk::API_VERSION_1_0,
        enable_validation,
        validation_layers: cstrings(&["VK_LAYER_KHRONOS_validation"]),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    Instance,
    Messenger,
    Device,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Created(Object),
    Destroyed(Object),
    QueriedQueueFamilies(vk::PhysicalDevice),
}

#[derive(Debug, Clone)]
pub struct RecordedInstance {
    pub app_name: CString,
    pub layers: Vec<CString>,
    pub extensions: Vec<CString>,
    pub chained_messenger: bool,
}

#[derive(Debug, Clone)]
pub struct RecordedDevice {
    pub physical_device: vk::PhysicalDevice,
    pub queue_family: u32,
    pub queue_priorities: Vec<f32>,
    pub layers: Vec<CString>,
    pub no_features: bool,
}

pub struct FakeGpu {
    pub name: String,
    pub families: Vec<vk::QueueFlags>,
}

impl FakeGpu {
    pub fn new(name: &str, families: &[vk::QueueFlags]) -> Self {
        Self {
            name: name.to_string(),
            families: families.to_vec(),
        }
    }
}

pub struct FakeDriver {
    pub layers: Vec<CString>,
    pub instance_result: vk::Result,
    pub debug_utils_present: Cell<bool>,
    pub messenger_result: vk::Result,
    pub enumerate_result: vk::Result,
    pub device_result: vk::Result,
    pub gpus: Vec<FakeGpu>,
    pub events: RefCell<Vec<Event>>,
    pub layer_queries: Cell<usize>,
    pub instance_request: RefCell<Option<RecordedInstance>>,
    pub device_request: RefCell<Option<RecordedDevice>>,
}

impl Default for FakeDriver {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            instance_result: vk::Result::SUCCESS,
            debug_utils_present: Cell::new(true),
            messenger_result: vk::Result::SUCCESS,
            enumerate_result: vk::Result::SUCCESS,
            device_result: vk::Result::SUCCESS,
            gpus: vec![FakeGpu::new("Fake GPU", &[vk::QueueFlags::GRAPHICS])],
            events: RefCell::new(Vec::new()),
            layer_queries: Cell::new(0),
            instance_request: RefCell::new(None),
            device_request: RefCell::new(None),
        }
    }
}

impl FakeDriver {
    pub fn with_validation_layer() -> Self {
        Self {
            layers: cstrings(&["VK_LAYER_KHRONOS_validation"]),
            ..Self::default()
        }
    }

    pub fn queue_handle(family: u32, index: u32) -> vk::Queue {
        vk::Queue::from_raw(0x1000 + u64::from(family) * 0x10 + u64::from(index))
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn layer_queries(&self) -> usize {
        self.layer_queries.get()
    }

    pub fn instance_request(&self) -> Option<RecordedInstance> {
        self.instance_request.borrow().clone()
    }

    pub fn device_request(&self) -> Option<RecordedDevice> {
        self.device_request.borrow().clone()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    fn check(result: vk::Result) -> VkResult<()> {
        if result == vk::Result::SUCCESS {
            Ok(())
        } else {
            Err(result)
        }
    }

    fn gpu(&self, physical_device: vk::PhysicalDevice) -> &FakeGpu {
        &self.gpus[physical_device.as_raw() as usize - 1]
    }
}

fn all_features_off(features: &vk::PhysicalDeviceFeatures) -> bool {
    let words = unsafe {
        std::slice::from_raw_parts(
            (features as *const vk::PhysicalDeviceFeatures).cast::<vk::Bool32>(),
            size_of::<vk::PhysicalDeviceFeatures>() / size_of::<vk::Bool32>(),
        )
    };
    words.iter().all(|&word| word == vk::FALSE)
}

impl Driver for FakeDriver {
    type Instance = u64;
    type Device = u64;
    type DebugUtils = ();

    fn instance_layers(&self) -> VkResult<Vec<CString>> {
        self.layer_queries.set(self.layer_queries.get() + 1);
        Ok(self.layers.clone())
    }

    fn create_instance(&self, request: &InstanceRequest<'_>) -> VkResult<u64> {
        *self.instance_request.borrow_mut() = Some(RecordedInstance {
            app_name: request.app_name.to_owned(),
            layers: request.layers.to_vec(),
            extensions: request.extensions.to_vec(),
            chained_messenger: request.messenger.is_some(),
        });
        Self::check(self.instance_result)?;
        self.record(Event::Created(Object::Instance));
        Ok(1)
    }

    fn destroy_instance(&self, _instance: &u64) {
        self.record(Event::Destroyed(Object::Instance));
    }

    fn debug_utils(&self, _instance: &u64) -> EntryPoint<()> {
        if self.debug_utils_present.get() {
            EntryPoint::Available(())
        } else {
            EntryPoint::Unavailable
        }
    }

    fn create_messenger(
        &self,
        _utils: &(),
        _config: &MessengerConfig,
    ) -> VkResult<vk::DebugUtilsMessengerEXT> {
        Self::check(self.messenger_result)?;
        self.record(Event::Created(Object::Messenger));
        Ok(vk::DebugUtilsMessengerEXT::from_raw(1))
    }

    fn destroy_messenger(&self, _utils: &(), _messenger: vk::DebugUtilsMessengerEXT) {
        self.record(Event::Destroyed(Object::Messenger));
    }

    fn physical_devices(&self, _instance: &u64) -> VkResult<Vec<vk::PhysicalDevice>> {
        Self::check(self.enumerate_result)?;
        Ok((1..=self.gpus.len() as u64)
            .map(vk::PhysicalDevice::from_raw)
            .collect())
    }

    fn queue_families(
        &self,
        _instance: &u64,
        physical_device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        self.record(Event::QueriedQueueFamilies(physical_device));
        self.gpu(physical_device)
            .families
            .iter()
            .map(|&queue_flags| vk::QueueFamilyProperties {
                queue_flags,
                queue_count: 1,
                ..Default::default()
            })
            .collect()
    }

    fn device_name(&self, _instance: &u64, physical_device: vk::PhysicalDevice) -> String {
        self.gpu(physical_device).name.clone()
    }

    fn create_device(
        &self,
        _instance: &u64,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest<'_>,
    ) -> VkResult<u64> {
        *self.device_request.borrow_mut() = Some(RecordedDevice {
            physical_device,
            queue_family: request.queue_family,
            queue_priorities: request.queue_priorities.to_vec(),
            layers: request.layers.to_vec(),
            no_features: all_features_off(&request.features),
        });
        Self::check(self.device_result)?;
        self.record(Event::Created(Object::Device));
        Ok(1)
    }

    fn device_queue(&self, _device: &u64, family: u32, index: u32) -> vk::Queue {
        Self::queue_handle(family, index)
    }

    fn wait_idle(&self, _device: &u64) -> VkResult<()> {
        Ok(())
    }

    fn destroy_device(&self, _device: &u64) {
        self.record(Event::Destroyed(Object::Device));
    }
}
