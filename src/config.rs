use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::PrefixConfig;
use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "semver-release.toml";

/// Represents the complete configuration for semver-release.
///
/// Contains the prefix scheme and behavior options. Command-line arguments
/// and action inputs override anything set here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub prefixes: PrefixConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration for behavior customization.
///
/// Controls what the run writes, never what it decides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Move major/minor alias tags on GA and patch releases
    #[serde(default)]
    pub aliases: bool,

    /// Push created tags and aliases to `remote`
    #[serde(default)]
    pub push: bool,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            aliases: false,
            push: false,
            remote: default_remote(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver-release.toml` in current directory
/// 3. `semver-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or holds invalid prefixes
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => default_config_path(),
    };

    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&content).map_err(|e| {
                ReleaseError::config(format!("Cannot parse '{}': {}", path.display(), e))
            })?
        }
        None => Config::default(),
    };

    config.prefixes.validate()?;
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prefixes, PrefixConfig::default());
        assert!(!config.behavior.aliases);
        assert!(!config.behavior.push);
        assert_eq!(config.behavior.remote, "origin");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[prefixes]\ntag_prefix = \"pkg-v\"\n").unwrap();
        assert_eq!(config.prefixes.release_prefix, "release/v");
        assert_eq!(config.prefixes.tag_prefix, "pkg-v");
        assert_eq!(config.behavior, BehaviorConfig::default());
    }

    #[test]
    fn test_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
