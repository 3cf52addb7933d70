use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::{BranchEntry, BranchSpec, TagFormat};
use crate::error::Result;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "gitrelease.toml";

/// Represents the complete configuration for git-release.
///
/// Branch entries are kept as configured, malformed ones included; they are
/// validated together when the branch set is built.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default = "default_branches")]
    pub branches: Vec<BranchEntry>,
}

/// Returns the default tag format.
fn default_tag_format() -> String {
    "v{version}".to_string()
}

/// Returns the default branch list.
fn default_branches() -> Vec<BranchEntry> {
    vec![
        BranchEntry::from("master"),
        BranchEntry::from("next"),
        BranchEntry::from("next-major"),
        BranchEntry::from(BranchSpec::new("beta").with_prerelease(true)),
        BranchEntry::from(BranchSpec::new("alpha").with_prerelease(true)),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_format: default_tag_format(),
            branches: default_branches(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// The validated tag format
    pub fn tag_format(&self) -> Result<TagFormat> {
        TagFormat::new(self.tag_format.as_str())
    }

    /// Names of the configured branches, malformed entries excluded.
    pub fn branch_names(&self) -> Vec<&str> {
        self.branches
            .iter()
            .filter_map(BranchEntry::valid_name)
            .collect()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
