//! Configuration management module for failcast
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - A profile layer selected by `FAILCAST_APP_ENV` (default `development`)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{profile}.toml` - Profile-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `FAILCAST_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, ConsoleSettings, DispatchConfig, FileSettings, LoggerSettings, Settings,
};
