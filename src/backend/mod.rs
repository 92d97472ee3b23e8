// Backend module - Vulkan bootstrap
//
// Design: each Vulkan object lives in a guard that destroys it on drop, so
// teardown order falls out of ownership. The runtime itself sits behind the
// `Driver` trait.

pub mod context;
pub mod debug;
pub mod device;
pub mod driver;
pub mod error;
pub mod instance;
pub mod layers;
pub mod physical;
pub mod vulkan;

#[cfg(test)]
pub mod testing;

pub use context::{ContextSettings, GpuContext};
pub use error::BootstrapError;
pub use vulkan::VulkanDriver;
