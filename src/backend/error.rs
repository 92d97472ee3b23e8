// Bootstrap errors
//
// One error type for the whole instance/device bootstrap. Every variant is
// fatal: the caller unwinds, guards tear down whatever was created, and the
// process exits non-zero.

use ash::vk;
use std::ffi::NulError;
use std::fmt;
use thiserror::Error;

/// Vulkan objects whose creation can fail during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulkanObject {
    Instance,
    DebugMessenger,
    LogicalDevice,
}

impl fmt::Display for VulkanObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instance => "instance",
            Self::DebugMessenger => "debug messenger",
            Self::LogicalDevice => "logical device",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Validation was requested but the runtime does not ship the layers.
    #[error("validation layers requested, but not available: {}", .missing.join(", "))]
    Configuration { missing: Vec<String> },

    #[error("failed to create {object}: {result}")]
    Creation {
        object: VulkanObject,
        result: vk::Result,
    },

    #[error("failed to find GPUs with Vulkan support")]
    NoDevices,

    #[error("failed to find a suitable GPU among {candidates} device(s)")]
    NoSuitableDevice { candidates: usize },

    #[error("failed to query {query}: {result}")]
    Query {
        query: &'static str,
        result: vk::Result,
    },

    #[error("failed to load Vulkan library: {0}")]
    Loader(#[from] ash::LoadingError),

    #[error("invalid name: {0}")]
    InvalidName(#[from] NulError),
}

impl BootstrapError {
    pub fn creation(object: VulkanObject) -> impl FnOnce(vk::Result) -> Self {
        move |result| Self::Creation { object, result }
    }

    pub fn query(query: &'static str) -> impl FnOnce(vk::Result) -> Self {
        move |result| Self::Query { query, result }
    }

    /// Zero devices enumerated, or none passed the suitability check.
    pub fn is_no_hardware(&self) -> bool {
        matches!(self, Self::NoDevices | Self::NoSuitableDevice { .. })
    }
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
