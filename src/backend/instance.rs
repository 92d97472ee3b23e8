// Instance creation
//
// Builds the VkInstance from the negotiated layers and extensions and wraps
// it in a guard that destroys it on drop.

use super::context::ContextSettings;
use super::debug;
use super::driver::{Driver, InstanceRequest};
use super::error::{BootstrapError, BootstrapResult, VulkanObject};
use super::layers;
use std::ffi::CString;
use std::rc::Rc;

/// Owned instance handle plus the layers it was created with.
pub struct Instance<D: Driver> {
    raw: D::Instance,
    layers: Vec<CString>,
    driver: Rc<D>,
}

impl<D: Driver> Instance<D> {
    /// Negotiate layers, collect extensions and create the instance.
    ///
    /// Fails before touching the runtime's create call when validation is
    /// requested but the layers are not installed.
    pub fn new(
        driver: Rc<D>,
        settings: &ContextSettings,
        window_extensions: &[CString],
    ) -> BootstrapResult<Self> {
        let layers = layers::negotiate_layers(
            driver.as_ref(),
            &settings.validation_layers,
            settings.enable_validation,
        )?;
        let extensions = layers::instance_extensions(window_extensions, settings.enable_validation);
        log::debug!("Instance extensions: {:?}", extensions);

        let messenger = settings.enable_validation.then(debug::messenger_config);

        let request = InstanceRequest {
            app_name: &settings.app_name,
            app_version: settings.app_version,
            engine_name: &settings.engine_name,
            engine_version: settings.engine_version,
            api_version: settings.api_version,
            layers: &layers,
            extensions: &extensions,
            messenger: messenger.as_ref(),
        };

        let raw = driver
            .create_instance(&request)
            .map_err(BootstrapError::creation(VulkanObject::Instance))?;
        log::info!("Created Vulkan instance for {:?}", settings.app_name);

        Ok(Self { raw, layers, driver })
    }

    pub fn raw(&self) -> &D::Instance {
        &self.raw
    }

    /// Layers enabled on this instance; reused for the logical device.
    pub fn layers(&self) -> &[CString] {
        &self.layers
    }

    pub fn driver(&self) -> &Rc<D> {
        &self.driver
    }
}

impl<D: Driver> Drop for Instance<D> {
    fn drop(&mut self) {
        log::debug!("Destroying Vulkan instance");
        self.driver.destroy_instance(&self.raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{cstrings, settings, Event, FakeDriver, Object};
    use ash::vk;

    #[test]
    fn validation_enables_layers_extension_and_chained_messenger() {
        let driver = Rc::new(FakeDriver::with_validation_layer());
        let window = cstrings(&["VK_KHR_surface"]);

        let instance = Instance::new(driver.clone(), &settings(true), &window).unwrap();

        assert_eq!(instance.layers(), &cstrings(&["VK_LAYER_KHRONOS_validation"])[..]);
        let request = driver.instance_request().unwrap();
        assert_eq!(request.layers, cstrings(&["VK_LAYER_KHRONOS_validation"]));
        assert_eq!(request.extensions, cstrings(&["VK_KHR_surface", "VK_EXT_debug_utils"]));
        assert!(request.chained_messenger);
        assert_eq!(request.app_name, c"Hello Triangle".to_owned());
    }

    #[test]
    fn release_settings_create_a_bare_instance() {
        let driver = Rc::new(FakeDriver::with_validation_layer());
        let window = cstrings(&["VK_KHR_surface"]);

        let instance = Instance::new(driver.clone(), &settings(false), &window).unwrap();

        assert!(instance.layers().is_empty());
        let request = driver.instance_request().unwrap();
        assert!(request.layers.is_empty());
        assert_eq!(request.extensions, window);
        assert!(!request.chained_messenger);
    }

    #[test]
    fn missing_layer_fails_before_creation() {
        let driver = Rc::new(FakeDriver::default());

        let result = Instance::new(driver.clone(), &settings(true), &[]);

        assert!(matches!(result, Err(BootstrapError::Configuration { .. })));
        assert!(driver.events().is_empty());
        assert!(driver.instance_request().is_none());
    }

    #[test]
    fn failed_creation_reports_the_status() {
        let driver = Rc::new(FakeDriver {
            instance_result: vk::Result::ERROR_INCOMPATIBLE_DRIVER,
            ..FakeDriver::default()
        });

        let result = Instance::new(driver.clone(), &settings(false), &[]);

        assert!(matches!(
            result,
            Err(BootstrapError::Creation {
                object: VulkanObject::Instance,
                result: vk::Result::ERROR_INCOMPATIBLE_DRIVER,
            })
        ));
        assert!(driver.events().is_empty());
    }

    #[test]
    fn dropping_the_guard_destroys_the_instance() {
        let driver = Rc::new(FakeDriver::default());

        drop(Instance::new(driver.clone(), &settings(false), &[]).unwrap());

        assert_eq!(
            driver.events(),
            vec![
                Event::Created(Object::Instance),
                Event::Destroyed(Object::Instance),
            ]
        );
    }
}
