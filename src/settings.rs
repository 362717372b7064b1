//! Configuration loading.
//!
//! Settings come from `Settings.toml` in the working directory, optionally
//! overridden by a `Settings.toml` under `ACTIX_SOCIAL_SECRETS_DIR`, with
//! environment variables taking final precedence. Loading also reads a
//! `.env` file and initializes the logger.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::facebook::FacebookConfig;
use crate::models::ApiCredentials;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocialSettings {
    pub facebook: FacebookSettings,
    pub linkedin: LinkedInSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacebookSettings {
    /// Application key; also names the auth cookie (`fbs_{app_key}`).
    pub app_key: String,

    // Direct value (can be overridden by environment variables)
    pub app_secret: Option<String>,

    // Environment variable name for an indirect override
    pub app_secret_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LinkedInSettings {
    // Direct values (can be overridden by environment variables)
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,

    // Environment variable names for indirect overrides
    pub consumer_key_env: Option<String>,
    pub consumer_secret_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SocialSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    /// - TOML parsing fails
    pub fn load() -> Result<Self> {
        // Initialize environment and logging
        Self::initialize_environment()?;

        // Load base settings from TOML or defaults
        let mut settings = Self::load_base_settings()?;

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut settings);

        Ok(settings)
    }

    /// Initialize environment variables and logging
    fn initialize_environment() -> Result<()> {
        Self::load_env_file();
        env_logger::try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `ACTIX_SOCIAL_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    fn load_base_settings() -> Result<Self> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            let toml_content = fs::read_to_string(&default_config_path)?;
            settings = basic_toml::from_str(&toml_content)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        // If ACTIX_SOCIAL_SECRETS_DIR is set and contains Settings.toml,
        // replace with those settings (higher priority)
        if let Ok(secrets_dir) = std::env::var("ACTIX_SOCIAL_SECRETS_DIR") {
            let secrets_path = std::path::Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                let secrets_toml_content = fs::read_to_string(&secrets_path)?;
                settings = basic_toml::from_str(&secrets_toml_content)?;
                println!("✓ Overriding settings from {}", secrets_path.display());
            } else {
                println!(
                    "ℹ ACTIX_SOCIAL_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides(settings: &mut Self) {
        if let Ok(app_key) = std::env::var("FACEBOOK_APP_KEY") {
            settings.facebook.app_key = app_key;
        }
        if let Ok(app_secret) = std::env::var("FACEBOOK_APP_SECRET") {
            settings.facebook.app_secret = Some(app_secret);
        }
        if let Ok(consumer_key) = std::env::var("LINKEDIN_CONSUMER_KEY") {
            settings.linkedin.consumer_key = Some(consumer_key);
        }
        if let Ok(consumer_secret) = std::env::var("LINKEDIN_CONSUMER_SECRET") {
            settings.linkedin.consumer_secret = Some(consumer_secret);
        }
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            settings.logging.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }
}

impl FacebookSettings {
    /// Get the app secret, checking the named environment variable first,
    /// then falling back to the direct value
    #[must_use]
    pub fn get_app_secret(&self) -> Option<String> {
        if let Some(env_var) = &self.app_secret_env {
            if let Ok(value) = std::env::var(env_var) {
                return Some(value);
            }
        }
        self.app_secret.clone()
    }

    /// Build the cookie-verification configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the app key or app secret is not configured.
    pub fn to_config(&self) -> Result<FacebookConfig> {
        if self.app_key.is_empty() {
            bail!("facebook.app_key is not configured");
        }
        let Some(app_secret) = self.get_app_secret() else {
            bail!("facebook app secret is not configured (set facebook.app_secret or FACEBOOK_APP_SECRET)");
        };
        Ok(FacebookConfig::new(self.app_key.clone(), app_secret))
    }
}

impl LinkedInSettings {
    /// Get the consumer key, checking the named environment variable first,
    /// then falling back to the direct value
    #[must_use]
    pub fn get_consumer_key(&self) -> Option<String> {
        if let Some(env_var) = &self.consumer_key_env {
            if let Ok(value) = std::env::var(env_var) {
                return Some(value);
            }
        }
        self.consumer_key.clone()
    }

    /// Get the consumer secret, checking the named environment variable
    /// first, then falling back to the direct value
    #[must_use]
    pub fn get_consumer_secret(&self) -> Option<String> {
        if let Some(env_var) = &self.consumer_secret_env {
            if let Ok(value) = std::env::var(env_var) {
                return Some(value);
            }
        }
        self.consumer_secret.clone()
    }

    /// Build the stored API credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer key or secret is not configured.
    pub fn to_credentials(&self) -> Result<ApiCredentials> {
        let Some(consumer_key) = self.get_consumer_key() else {
            bail!("linkedin consumer key is not configured (set linkedin.consumer_key or LINKEDIN_CONSUMER_KEY)");
        };
        let Some(consumer_secret) = self.get_consumer_secret() else {
            bail!("linkedin consumer secret is not configured (set linkedin.consumer_secret or LINKEDIN_CONSUMER_SECRET)");
        };
        Ok(ApiCredentials::new(consumer_key, consumer_secret))
    }
}
