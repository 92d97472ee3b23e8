// =============================================================================
// CONFIGURATION - Load settings from config.toml
// =============================================================================
//
// This module handles loading and parsing configuration from config.toml.
// Provides sensible defaults if config file is missing or has errors.

use crate::backend::error::BootstrapResult;
use crate::backend::ContextSettings;
use anyhow::{Context, Result};
use ash::vk;
use log::LevelFilter;
use serde::Deserialize;
use std::ffi::CString;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub application: ApplicationConfig,
    pub debug: DebugConfig,
}

/// Window settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vulkan".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

/// Metadata reported to the driver in VkApplicationInfo
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    pub version: [u32; 3],
    pub engine_name: String,
    pub engine_version: [u32; 3],
    pub api_version: [u32; 3],
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "Hello Triangle".to_string(),
            version: [1, 0, 0],
            engine_name: "No Engine".to_string(),
            engine_version: [1, 0, 0],
            api_version: [1, 0, 0],
        }
    }
}

/// Debug settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Only honoured in debug builds
    pub validation: bool,
    pub validation_layers: Vec<String>,
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            validation: true,
            validation_layers: vec!["VK_LAYER_KHRONOS_validation".to_string()],
            log_level: "info".to_string(),
        }
    }
}

fn make_version([major, minor, patch]: [u32; 3]) -> u32 {
    vk::make_api_version(0, major, minor, patch)
}

pub const CONFIG_PATH: &str = "config.toml";

impl Config {
    /// Load `config.toml` from the working directory. See `load_or_default`.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        Self::load_or_default(CONFIG_PATH)
    }

    /// Defaults plus the reason when the file exists but cannot be used.
    /// Runs before the logger is installed, so the caller reports the error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<anyhow::Error>) {
        match Self::load_from_path(path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validation layers are compiled out of release builds regardless of config.
    pub fn validation_enabled(&self) -> bool {
        cfg!(debug_assertions) && self.debug.validation
    }

    /// Log filter from `debug.log_level`, `info` when unrecognised.
    pub fn log_level(&self) -> LevelFilter {
        self.debug.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Bundle everything the bootstrap needs into one value.
    pub fn context_settings(&self) -> BootstrapResult<ContextSettings> {
        let app = &self.application;
        let validation_layers = self
            .debug
            .validation_layers
            .iter()
            .map(|name| CString::new(name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ContextSettings {
            app_name: CString::new(app.name.as_str())?,
            app_version: make_version(app.version),
            engine_name: CString::new(app.engine_name.as_str())?,
            engine_version: make_version(app.engine_version),
            api_version: make_version(app.api_version),
            enable_validation: self.validation_enabled(),
            validation_layers,
        })
    }
}
