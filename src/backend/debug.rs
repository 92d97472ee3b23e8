// Debug messenger - validation layer output routed into `log`
//
// Only created when validation is enabled. The create/destroy functions come
// from VK_EXT_debug_utils and are resolved at runtime, so both sides go
// through `Driver::debug_utils` and handle the entry points being absent.

use super::driver::{Driver, EntryPoint, MessengerConfig};
use super::error::{BootstrapError, BootstrapResult, VulkanObject};
use super::instance::Instance;
use ash::vk;
use std::borrow::Cow;
use std::ffi::CStr;
use std::rc::Rc;

/// Verbose, warning and error messages of every category, logged by
/// `debug_callback`.
pub fn messenger_config() -> MessengerConfig {
    MessengerConfig {
        severity: vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
            | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
        kinds: vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        callback: Some(debug_callback),
    }
}

pub struct DebugMessenger<D: Driver> {
    raw: vk::DebugUtilsMessengerEXT,
    instance: D::Instance,
    driver: Rc<D>,
}

impl<D: Driver> DebugMessenger<D> {
    pub fn new(instance: &Instance<D>) -> BootstrapResult<Self> {
        let driver = instance.driver().clone();

        let utils = match driver.debug_utils(instance.raw()) {
            EntryPoint::Available(utils) => utils,
            EntryPoint::Unavailable => {
                return Err(BootstrapError::Creation {
                    object: VulkanObject::DebugMessenger,
                    result: vk::Result::ERROR_EXTENSION_NOT_PRESENT,
                })
            }
        };

        let raw = driver
            .create_messenger(&utils, &messenger_config())
            .map_err(BootstrapError::creation(VulkanObject::DebugMessenger))?;
        log::debug!("Debug messenger attached");

        Ok(Self {
            raw,
            instance: instance.raw().clone(),
            driver,
        })
    }
}

impl<D: Driver> Drop for DebugMessenger<D> {
    fn drop(&mut self) {
        match self.driver.debug_utils(&self.instance) {
            EntryPoint::Available(utils) => {
                log::debug!("Destroying debug messenger");
                self.driver.destroy_messenger(&utils, self.raw);
            }
            EntryPoint::Unavailable => {
                log::warn!("vkDestroyDebugUtilsMessengerEXT unavailable, skipping messenger destroy");
            }
        }
    }
}

fn category(kind: vk::DebugUtilsMessageTypeFlagsEXT) -> &'static str {
    if kind.contains(vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION) {
        "validation"
    } else if kind.contains(vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE) {
        "performance"
    } else {
        "general"
    }
}

// Debug callback for validation layers. Never asks the driver to abort.
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    let message = if p_callback_data.is_null() || (*p_callback_data).p_message.is_null() {
        Cow::Borrowed("<no message>")
    } else {
        CStr::from_ptr((*p_callback_data).p_message).to_string_lossy()
    };
    let category = category(message_type);

    match message_severity {
        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR => {
            log::error!("[Vulkan {}] {}", category, message);
        }
        vk::DebugUtilsMessageSeverityFlagsEXT::WARNING => {
            log::warn!("[Vulkan {}] {}", category, message);
        }
        vk::DebugUtilsMessageSeverityFlagsEXT::INFO => {
            log::info!("[Vulkan {}] {}", category, message);
        }
        _ => {
            log::debug!("[Vulkan {}] {}", category, message);
        }
    }

    vk::FALSE
}
