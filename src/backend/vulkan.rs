// Vulkan driver - ash-backed implementation of `Driver`
//
// Thin wrapper around ash: owns the loaded entry point and forwards each
// call. Ordering and ownership are enforced by the guards above this layer.

use super::driver::{DeviceRequest, Driver, EntryPoint, InstanceRequest, MessengerConfig};
use super::error::BootstrapResult;
use ash::extensions::ext::DebugUtils;
use ash::prelude::VkResult;
use ash::{vk, Entry};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

pub struct VulkanDriver {
    entry: Entry,
}

impl VulkanDriver {
    /// Load the system Vulkan library.
    pub fn load() -> BootstrapResult<Self> {
        // Safety: the loader is kept alive by `self` for as long as any
        // instance created through it.
        let entry = unsafe { Entry::load() }?;
        Ok(Self { entry })
    }
}

fn name_pointers(names: &[CString]) -> Vec<*const c_char> {
    names.iter().map(|name| name.as_ptr()).collect()
}

fn messenger_create_info(config: &MessengerConfig) -> vk::DebugUtilsMessengerCreateInfoEXT {
    vk::DebugUtilsMessengerCreateInfoEXT::builder()
        .message_severity(config.severity)
        .message_type(config.kinds)
        .pfn_user_callback(config.callback)
        .build()
}

impl Driver for VulkanDriver {
    type Instance = ash::Instance;
    type Device = ash::Device;
    type DebugUtils = DebugUtils;

    fn instance_layers(&self) -> VkResult<Vec<CString>> {
        let layers = self.entry.enumerate_instance_layer_properties()?;
        Ok(layers
            .iter()
            .map(|layer| unsafe { CStr::from_ptr(layer.layer_name.as_ptr()) }.to_owned())
            .collect())
    }

    fn create_instance(&self, request: &InstanceRequest<'_>) -> VkResult<ash::Instance> {
        let app_info = vk::ApplicationInfo::builder()
            .application_name(request.app_name)
            .application_version(request.app_version)
            .engine_name(request.engine_name)
            .engine_version(request.engine_version)
            .api_version(request.api_version);

        let layers = name_pointers(request.layers);
        let extensions = name_pointers(request.extensions);
        let mut debug_info = request.messenger.map(messenger_create_info);

        let mut create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layers);

        // Chained so messages emitted by vkCreateInstance itself are reported
        if let Some(debug_info) = debug_info.as_mut() {
            create_info = create_info.push_next(debug_info);
        }

        unsafe { self.entry.create_instance(&create_info, None) }
    }

    fn destroy_instance(&self, instance: &ash::Instance) {
        unsafe { instance.destroy_instance(None) };
    }

    fn debug_utils(&self, instance: &ash::Instance) -> EntryPoint<DebugUtils> {
        // DebugUtils::new silently installs panicking stubs for missing
        // functions, so probe both entry points first.
        let resolved = [
            c"vkCreateDebugUtilsMessengerEXT",
            c"vkDestroyDebugUtilsMessengerEXT",
        ]
        .iter()
        .all(|name| unsafe {
            self.entry
                .get_instance_proc_addr(instance.handle(), name.as_ptr())
                .is_some()
        });

        if resolved {
            EntryPoint::Available(DebugUtils::new(&self.entry, instance))
        } else {
            EntryPoint::Unavailable
        }
    }

    fn create_messenger(
        &self,
        utils: &DebugUtils,
        config: &MessengerConfig,
    ) -> VkResult<vk::DebugUtilsMessengerEXT> {
        let create_info = messenger_create_info(config);
        unsafe { utils.create_debug_utils_messenger(&create_info, None) }
    }

    fn destroy_messenger(&self, utils: &DebugUtils, messenger: vk::DebugUtilsMessengerEXT) {
        unsafe { utils.destroy_debug_utils_messenger(messenger, None) };
    }

    fn physical_devices(&self, instance: &ash::Instance) -> VkResult<Vec<vk::PhysicalDevice>> {
        unsafe { instance.enumerate_physical_devices() }
    }

    fn queue_families(
        &self,
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        unsafe { instance.get_physical_device_queue_family_properties(physical_device) }
    }

    fn device_name(&self, instance: &ash::Instance, physical_device: vk::PhysicalDevice) -> String {
        let properties = unsafe { instance.get_physical_device_properties(physical_device) };
        unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    fn create_device(
        &self,
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        request: &DeviceRequest<'_>,
    ) -> VkResult<ash::Device> {
        let queue_create_info = vk::DeviceQueueCreateInfo::builder()
            .queue_family_index(request.queue_family)
            .queue_priorities(request.queue_priorities)
            .build();

        // Device layers are ignored by current loaders but still honoured by
        // older ones
        let layers = name_pointers(request.layers);

        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(std::slice::from_ref(&queue_create_info))
            .enabled_features(&request.features)
            .enabled_layer_names(&layers);

        unsafe { instance.create_device(physical_device, &create_info, None) }
    }

    fn device_queue(&self, device: &ash::Device, family: u32, index: u32) -> vk::Queue {
        unsafe { device.get_device_queue(family, index) }
    }

    fn wait_idle(&self, device: &ash::Device) -> VkResult<()> {
        unsafe { device.device_wait_idle() }
    }

    fn destroy_device(&self, device: &ash::Device) {
        unsafe { device.destroy_device(None) };
    }
}
