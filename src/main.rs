// =============================================================================
// VULKAN BOOTSTRAP - Instance, debug messenger, device selection
// =============================================================================
//
// Opens a window, brings up a Vulkan instance and logical device, then idles
// in the event loop until the window is closed.
//
// STARTUP:
// 1. Window (winit) and its required instance extensions
// 2. Instance, with validation layers in debug builds
// 3. Debug messenger (validation only)
// 4. First GPU with a graphics queue family
// 5. Logical device + graphics queue
//
// Shutdown destroys everything in reverse. Any startup failure is logged,
// tears down what was created and exits non-zero.
//
// =============================================================================

mod backend;
mod config;
mod lifecycle;
mod window;

use anyhow::{Context, Result};
use backend::{BootstrapError, GpuContext, VulkanDriver};
use config::Config;
use lifecycle::{Lifecycle, Stage};
use std::rc::Rc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::Window,
};

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    // Load configuration from config.toml
    let (config, load_error) = Config::load();

    // Initialize logging
    init_logging(&config);
    log::info!("Starting Vulkan bootstrap");
    match load_error {
        Some(e) => log::warn!("Failed to load {}: {:#}. Using defaults.", config::CONFIG_PATH, e),
        None => log::debug!("Config: {:?}", config),
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => {
            log::info!("Clean shutdown");
            Ok(())
        }
    }
}

fn init_logging(config: &Config) {
    use env_logger::Builder;

    let mut builder = Builder::from_default_env();
    builder.filter_level(config.log_level());
    builder.init();
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// IMPORTANT: Field order matters for Drop! The GPU context must go before
/// the window it was created for.
struct App {
    config: Config,
    lifecycle: Lifecycle,
    context: Option<GpuContext<VulkanDriver>>,
    window: Option<Window>,
    /// First fatal error; returned from main for a non-zero exit code
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::new(),
            context: None,
            window: None,
            failure: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let settings = self.config.context_settings()?;

        let window = window::create_window(event_loop, &self.config.window)?;
        let extensions = window::required_extensions(&window)?;
        self.window = Some(window);
        self.lifecycle.advance(Stage::WindowReady);

        let driver = Rc::new(VulkanDriver::load()?);
        let context = GpuContext::new(driver, &settings, &extensions, &mut self.lifecycle)
            .context("Failed to initialize Vulkan")?;
        log::debug!(
            "Graphics queue {:?} on {} (family {}), debug messenger {}",
            context.graphics_queue(),
            context.physical_device().name,
            context.device().graphics_queue_family,
            if context.has_messenger() { "attached" } else { "off" }
        );
        self.context = Some(context);

        self.lifecycle.advance(Stage::Running);
        Ok(())
    }

    /// Tear everything down in reverse creation order. Safe to call twice.
    fn shutdown(&mut self) {
        if matches!(self.lifecycle.stage(), Stage::ShuttingDown | Stage::Terminated) {
            return;
        }
        self.lifecycle.advance(Stage::ShuttingDown);
        log::info!("Cleaning up Vulkan resources...");

        self.context = None;
        self.window = None;

        self.lifecycle.advance(Stage::Terminated);
        log::info!("Cleanup complete");
    }

    fn request_close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(context) = &self.context {
            if let Err(e) = context.device().wait_idle() {
                log::warn!("Device did not go idle before shutdown: {}", e);
            }
        }
        event_loop.exit();
    }
}

// =============================================================================
// EVENT HANDLING
// =============================================================================

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.stage() != Stage::Uninitialized {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("{:#}", e);
            if e
                .downcast_ref::<BootstrapError>()
                .is_some_and(BootstrapError::is_no_hardware)
            {
                log::error!("Check that a Vulkan driver is installed for your GPU");
            }
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down...");
                self.request_close(event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                use winit::keyboard::{KeyCode, PhysicalKey};

                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    log::info!("ESC pressed, exiting...");
                    self.request_close(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
