// Window - winit window and the instance extensions it needs

use crate::config::WindowConfig;
use anyhow::{Context, Result};
use raw_window_handle::HasRawDisplayHandle;
use std::ffi::{CStr, CString};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub fn create_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Window> {
    let attributes = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
        .with_resizable(config.resizable);

    let window = event_loop
        .create_window(attributes)
        .context("Failed to create window")?;

    log::info!("Window: {}x{} ({:?})", config.width, config.height, config.title);
    Ok(window)
}

/// Instance extensions the platform's surface support requires, in the order
/// the window system reports them.
pub fn required_extensions(window: &Window) -> Result<Vec<CString>> {
    let names = ash_window::enumerate_required_extensions(window.raw_display_handle())
        .context("Failed to query required surface extensions")?;

    // Safety: ash-window returns pointers to static, NUL-terminated names
    Ok(names
        .iter()
        .map(|&name| unsafe { CStr::from_ptr(name) }.to_owned())
        .collect())
}
