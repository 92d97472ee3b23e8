// Driver - the native API boundary
//
// Everything the bootstrap needs from the Vulkan runtime goes through this
// trait. `VulkanDriver` forwards to ash; tests plug in a recording fake.

use ash::prelude::VkResult;
use ash::vk;
use std::ffi::{CStr, CString};

/// An optional runtime entry point, resolved at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint<T> {
    Available(T),
    Unavailable,
}

/// Debug messenger settings, also chained onto instance creation.
#[derive(Clone, Copy)]
pub struct MessengerConfig {
    pub severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    pub kinds: vk::DebugUtilsMessageTypeFlagsEXT,
    pub callback: vk::PFN_vkDebugUtilsMessengerCallbackEXT,
}

/// Everything `vkCreateInstance` is given.
pub struct InstanceRequest<'a> {
    pub app_name: &'a CStr,
    pub app_version: u32,
    pub engine_name: &'a CStr,
    pub engine_version: u32,
    pub api_version: u32,
    pub layers: &'a [CString],
    pub extensions: &'a [CString],
    pub messenger: Option<&'a MessengerConfig>,
}

/// Everything `vkCreateDevice` is given. One queue family, one queue.
pub struct DeviceRequest<'a> {
    pub queue_family: u32,
    pub queue_priorities: &'a [f32],
    pub features: vk::PhysicalDeviceFeatures,
    pub layers: &'a [CString],
}

pub trait Driver {
    type Instance: Clone;
    type Device;
    type DebugUtils;

    fn instance_layers(&self) -> VkResult<Vec<CString>>;

    fn create_instance(&self, request: &InstanceRequest<'_>) -> VkResult<Self::Instance>;

    fn destroy_instance(&self, instance: &Self::Instance);

    /// Resolve `vkCreateDebugUtilsMessengerEXT`/`vkDestroyDebugUtilsMessengerEXT`.
    fn debug_utils(&self, instance: &Self::Instance) -> EntryPoint<Self::DebugUtils>;

    fn create_messenger(
        &self,
        utils: &Self::DebugUtils,
        config: &MessengerConfig,
    ) -> VkResult<vk::DebugUtilsMessengerEXT>;

    fn destroy_messenger(&self, utils: &Self::DebugUtils, messenger: vk::DebugUtilsMessengerEXT);

    fn physical_devices(&self, instance: &Self::Instance) -> VkResult<Vec<vk::PhysicalDevice>>;

    fn queue_families(
        &self,
        instance: &Self::Instance,
        physical_device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties>;

    fn device_name(&self, instance: &Self::Instance, physical_device: vk::PhysicalDevice)
        -> String;

    fn create_device(
        &self,
        instance: &Self::Instance,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest<'_>,
    ) -> VkResult<Self::Device>;

    fn device_queue(&self, device: &Self::Device, family: u32, index: u32) -> vk::Queue;

    fn wait_idle(&self, device: &Self::Device) -> VkResult<()>;

    fn destroy_device(&self, device: &Self::Device);
}
