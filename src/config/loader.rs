//! Configuration loader for failcast
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "FAILCAST_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "FAILCAST_CONFIG_FILE";

/// Environment variable naming the profile file layered over `default.toml`
const PROFILE_ENV: &str = "FAILCAST_APP_ENV";

/// Profile used when `FAILCAST_APP_ENV` is unset or empty
const DEFAULT_PROFILE: &str = "development";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "FAILCAST";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority, lowest first:
/// 1. `default.toml` (required)
/// 2. `{profile}.toml` (optional), the profile named by `FAILCAST_APP_ENV`
/// 3. `local.toml` (optional)
/// 4. `FAILCAST_*` environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    profile: String,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if both `FAILCAST_CONFIG_DIR` and `FAILCAST_CONFIG_FILE` are set,
    /// or if `FAILCAST_APP_ENV` is not a plain profile name.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "FAILCAST_CONFIG_DIR and FAILCAST_CONFIG_FILE cannot both be set. \
                 Use FAILCAST_CONFIG_DIR for layered configuration or \
                 FAILCAST_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            profile: profile_from_env()?,
        })
    }

    /// Profile selecting the `{profile}.toml` layer
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate settings from all sources
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // FAILCAST_DISPATCH__MAX_CONCURRENT_SENDS -> dispatch.max_concurrent_sends
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.profile));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            profile: DEFAULT_PROFILE.to_string(),
        })
    }
}

/// Reads the profile name, lowercased
///
/// Only ASCII letters, digits, `-` and `_` are accepted so the name cannot
/// point outside the configuration directory.
fn profile_from_env() -> Result<String, ConfigError> {
    let profile = match std::env::var(PROFILE_ENV) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_lowercase(),
        _ => return Ok(DEFAULT_PROFILE.to_string()),
    };

    let valid = profile
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ConfigError::EnvVarError(format!(
            "Invalid profile '{}' in {}. Use letters, digits, '-' or '_'.",
            profile, PROFILE_ENV
        )));
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests mutate process environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const DEFAULT_CONFIG: &str = r#"
[application]
name = "test-app"
version = "1.0.0"

[logger]
level = "info"

[logger.console]
enabled = true
colored = false

[dispatch]
max_concurrent_sends = 4
email_subject = "Build failed"
footer_text = "Test Build Notification"
timezone = "UTC"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn layered_env(env: &mut EnvGuard, dir: &TempDir) {
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.remove(CONFIG_FILE_ENV);
        env.remove(PROFILE_ENV);
    }

    #[test]
    fn test_config_loader_new_default() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.remove(PROFILE_ENV);

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.profile(), "development");
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("FAILCAST_CONFIG_DIR"));
                assert!(msg.contains("FAILCAST_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[]);
        layered_env(&mut env, &temp_dir);

        let loader = ConfigLoader::new().expect("Should create loader");
        match loader.load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);
        layered_env(&mut env, &temp_dir);

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.dispatch.max_concurrent_sends, 4);
        assert_eq!(settings.dispatch.footer_text, "Test Build Notification");
        assert_eq!(settings.dispatch.timezone.as_deref(), Some("UTC"));
        // not in the file
        assert_eq!(settings.dispatch.date_format, "%Y-%m-%d %H:%M:%S %Z");
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();

        let production_config = r#"
[application]
name = "prod-app"

[dispatch]
max_concurrent_sends = 16
email_subject = "Production build failed"
"#;
        let local_config = r#"
[dispatch]
max_concurrent_sends = 2
"#;

        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_CONFIG),
            ("production.toml", production_config),
            ("local.toml", local_config),
        ]);
        layered_env(&mut env, &temp_dir);
        env.set(PROFILE_ENV, "production");
        env.set("FAILCAST_DISPATCH__FOOTER_TEXT", "From env");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.dispatch.footer_text, "From env");
        assert_eq!(settings.dispatch.max_concurrent_sends, 2);
        assert_eq!(settings.dispatch.email_subject, "Production build failed");
        assert_eq!(settings.application.name, "prod-app");
        assert_eq!(settings.application.version, "1.0.0");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);
        layered_env(&mut env, &temp_dir);
        env.set("FAILCAST_DISPATCH__MAX_CONCURRENT_SENDS", "0");

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_load_single_file_mode() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();

        let temp_dir = setup_config_dir(&[("single.toml", DEFAULT_CONFIG)]);
        let config_file_path = temp_dir.path().join("single.toml");

        env.remove(CONFIG_DIR_ENV);
        env.set(CONFIG_FILE_ENV, config_file_path.to_str().unwrap());
        env.set(PROFILE_ENV, "staging");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.dispatch.email_subject, "Build failed");
    }

    #[test]
    fn test_custom_profile_selects_its_file() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();

        let ci_config = r#"
[dispatch]
footer_text = "CI Build Notification"
"#;
        let temp_dir =
            setup_config_dir(&[("default.toml", DEFAULT_CONFIG), ("ci.toml", ci_config)]);
        layered_env(&mut env, &temp_dir);
        env.set(PROFILE_ENV, " CI ");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.profile(), "ci");

        let settings = loader.load().expect("Should load settings");
        assert_eq!(settings.dispatch.footer_text, "CI Build Notification");
        assert_eq!(settings.dispatch.max_concurrent_sends, 4);
    }

    #[test]
    fn test_profile_outside_config_dir_rejected() {
        let _guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.set(PROFILE_ENV, "../secrets");

        match ConfigLoader::new() {
            Err(ConfigError::EnvVarError(msg)) => assert!(msg.contains("FAILCAST_APP_ENV")),
            other => panic!("Expected EnvVarError, got {:?}", other),
        }
    }
}
