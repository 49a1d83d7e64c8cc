//! Configuration file support for Treinolog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/treinolog/config.toml`.

use crate::{Result, Variant};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Workout log configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    /// Which deployment variant this installation runs
    #[serde(default)]
    pub variant: Variant,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            file_name: default_file_name(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("treinolog")
}

fn default_file_name() -> String {
    "treinos.csv".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("treinolog").join("config.toml")
    }

    /// Full path of the workout log file
    pub fn log_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.log.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log.variant, Variant::Basic);
        assert_eq!(config.log.file_name, "treinos.csv");
        assert!(config.log_path().ends_with("treinos.csv"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[log]
variant = "advanced"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log.variant, Variant::Advanced);
        assert_eq!(config.log.file_name, "treinos.csv"); // default
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
[data]
data_dir = "/tmp/treinolog-test"

[log]
variant = "simple"
file_name = "atleta.csv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log.variant, Variant::Simple);
        assert_eq!(
            config.log_path(),
            PathBuf::from("/tmp/treinolog-test/atleta.csv")
        );
    }
}
