//! Configuration for the gateway.

use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;

use crate::profile::RequestProfile;

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where the RAG backend lives.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Pacing of the simulated answer stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Delay between two frames. 0 disables pacing.
    #[serde(default = "default_frame_delay")]
    pub frame_delay_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: default_frame_delay(),
        }
    }
}

/// The two entry-point profiles. They are never merged.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesConfig {
    pub extended: RequestProfile,
    pub interactive: RequestProfile,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            extended: RequestProfile::extended(),
            interactive: RequestProfile::interactive(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_frame_delay() -> u64 {
    10
}

/// Register every field of a profile as a default under `key`, so a config
/// file or env var can override a single field.
fn profile_defaults(
    builder: ConfigBuilder<DefaultState>,
    key: &str,
    profile: &RequestProfile,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder
        .set_default(format!("{key}.top_k"), profile.top_k as i64)?
        .set_default(format!("{key}.max_tokens"), profile.max_tokens as i64)?
        .set_default(format!("{key}.temperature"), profile.temperature as f64)?
        .set_default(format!("{key}.include_context"), profile.include_context)?
        .set_default(format!("{key}.deadline_secs"), profile.deadline_secs as i64)?;

    if let Some(retry) = profile.retry {
        builder = builder
            .set_default(format!("{key}.retry.max_attempts"), retry.max_attempts as i64)?
            .set_default(format!("{key}.retry.delay_ms"), retry.delay_ms as i64)?;
    }

    Ok(builder)
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (GATEWAY__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same as [`Config::load`] with an explicit config file base name.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("backend.base_url", default_backend_url())?
            .set_default("backend.connect_timeout_secs", default_connect_timeout() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("stream.frame_delay_ms", default_frame_delay() as i64)?;
        let builder = profile_defaults(builder, "profiles.extended", &RequestProfile::extended())?;
        let builder =
            profile_defaults(builder, "profiles.interactive", &RequestProfile::interactive())?;

        let config: Config = builder
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject profiles that would produce invalid backend requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profiles
            .extended
            .validate()
            .map_err(|e| ConfigError::Message(format!("profiles.extended: {}", e)))?;
        self.profiles
            .interactive
            .validate()
            .map_err(|e| ConfigError::Message(format!("profiles.interactive: {}", e)))?;
        Ok(())
    }

    /// Backend base URL without a trailing slash.
    pub fn backend_url(&self) -> &str {
        self.backend.base_url.trim_end_matches('/')
    }
}
