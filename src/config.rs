use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::DetectorSettings;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub detection: DetectionSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub providers: ProviderSettings,
    #[serde(default)]
    pub taxonomy: TaxonomySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Radius in miles used when a request does not set one
    #[serde(default = "default_max_distance")]
    pub default_max_distance: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self { default_max_distance: default_max_distance() }
    }
}

fn default_max_distance() -> f64 { 50.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionSettings {
    #[serde(default = "default_confidence_divisor")]
    pub confidence_divisor: f64,
    #[serde(default = "default_clarification_threshold")]
    pub clarification_threshold: f64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            confidence_divisor: default_confidence_divisor(),
            clarification_threshold: default_clarification_threshold(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl From<&DetectionSettings> for DetectorSettings {
    fn from(value: &DetectionSettings) -> Self {
        DetectorSettings {
            confidence_divisor: value.confidence_divisor,
            clarification_threshold: value.clarification_threshold,
            max_suggestions: value.max_suggestions,
        }
    }
}

fn default_confidence_divisor() -> f64 { 5.0 }
fn default_clarification_threshold() -> f64 { 0.6 }
fn default_max_suggestions() -> usize { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_session_capacity")]
    pub capacity: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            capacity: default_session_capacity(),
        }
    }
}

fn default_session_ttl() -> u64 { 86_400 }
fn default_session_capacity() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// JSON file with provider records loaded at startup
    pub seed_file: Option<PathBuf>,
    /// Seed the sample providers when the store is empty
    #[serde(default = "default_true")]
    pub seed_samples: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            seed_file: None,
            seed_samples: true,
        }
    }
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomySettings {
    /// TOML file replacing the built-in taxonomy
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOMEMATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOMEMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOMEMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_platform_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HOMEMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honour the bare `PORT` variable most hosting platforms set
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()) {
        builder = builder.set_override("server.port", port)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_detection() {
        let detection = DetectionSettings::default();
        assert_eq!(detection.confidence_divisor, 5.0);
        assert_eq!(detection.clarification_threshold, 0.6);
        assert_eq!(detection.max_suggestions, 3);

        let detector: DetectorSettings = (&detection).into();
        assert_eq!(detector, DetectorSettings::default());
    }

    #[test]
    fn test_default_session_and_matching() {
        let settings = Settings::default();
        assert_eq!(settings.session.ttl_secs, 86_400);
        assert_eq!(settings.matching.default_max_distance, 50.0);
        assert!(settings.providers.seed_samples);
        assert!(settings.taxonomy.path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("homematch-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[matching]\ndefault_max_distance = 25.0\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.matching.default_max_distance, 25.0);
        assert_eq!(settings.logging.level, "info");
    }
}
