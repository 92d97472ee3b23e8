// Layer and extension negotiation
//
// Decides what the instance is created with: the validation layers (only
// when every requested one is installed) and the window system's required
// extensions, plus debug utils when validation is on.

use super::driver::Driver;
use super::error::{BootstrapError, BootstrapResult};
use ash::extensions::ext::DebugUtils;
use std::ffi::{CStr, CString};

/// True iff every requested layer is among the available ones.
/// Vacuously true for an empty request.
pub fn layers_available(requested: &[CString], available: &[CString]) -> bool {
    requested
        .iter()
        .all(|name| available.iter().any(|layer| layer == name))
}

/// Requested layers the runtime does not provide, in request order.
pub fn missing_layers<'a>(requested: &'a [CString], available: &[CString]) -> Vec<&'a CStr> {
    requested
        .iter()
        .filter(|name| !available.contains(name))
        .map(CString::as_c_str)
        .collect()
}

/// Layers to enable on the instance (and device). Empty when validation is
/// disabled; a configuration error when it is enabled but not installed.
pub fn negotiate_layers<D: Driver>(
    driver: &D,
    requested: &[CString],
    enable_validation: bool,
) -> BootstrapResult<Vec<CString>> {
    if !enable_validation {
        return Ok(Vec::new());
    }

    let available = driver
        .instance_layers()
        .map_err(BootstrapError::query("instance layers"))?;

    if !layers_available(requested, &available) {
        let missing = missing_layers(requested, &available)
            .into_iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        return Err(BootstrapError::Configuration { missing });
    }

    log::debug!("Validation layers available: {:?}", requested);
    Ok(requested.to_vec())
}

/// Window extensions in order, with debug utils appended iff validation is on.
pub fn instance_extensions(window_extensions: &[CString], enable_validation: bool) -> Vec<CString> {
    let mut extensions = window_extensions.to_vec();
    if enable_validation {
        extensions.push(DebugUtils::name().to_owned());
    }
    extensions
}
