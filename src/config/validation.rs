//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use jiff::Timestamp;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::config::error::ConfigError;
use crate::config::settings::{DispatchConfig, FileSettings, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl DispatchConfig {
    /// Validate dispatch configuration
    ///
    /// # Validation Rules
    /// - At least one send may be in flight
    /// - Subject and footer must not be blank
    /// - The date format must render
    /// - The time zone, when set, must exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_sends == 0 {
            return Err(ConfigError::validation(
                "dispatch.max_concurrent_sends",
                "Max concurrent sends must be greater than 0.",
            ));
        }

        if self.email_subject.trim().is_empty() {
            return Err(ConfigError::validation(
                "dispatch.email_subject",
                "Email subject cannot be empty.",
            ));
        }

        if self.footer_text.trim().is_empty() {
            return Err(ConfigError::validation(
                "dispatch.footer_text",
                "Footer text cannot be empty.",
            ));
        }

        if let Err(e) = strtime::format(
            &self.date_format,
            &Timestamp::UNIX_EPOCH.to_zoned(TimeZone::UTC),
        ) {
            return Err(ConfigError::ValidationError {
                field: "dispatch.date_format".to_string(),
                message: format!("Invalid date format '{}': {}", self.date_format, e),
            });
        }

        self.time_zone()?;

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        // If file logging is enabled, path must not be empty
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one output must be enabled
    /// - If file logging is enabled, path must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.dispatch.validate()?;
        Ok(())
    }
}
