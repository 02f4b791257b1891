use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a harness directory.
///
/// Read from `config.toml` at the directory root. Every field has a default,
/// so the file is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether `*.yaml` files that fail to load are skipped instead of
    /// reported as errors.
    pub allow_unrecognised: bool,

    /// Number of decimal places used when printing lengths.
    precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_unrecognised: false,
            precision: default_precision(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the number of decimal places for printed lengths.
    #[must_use]
    pub const fn precision(&self) -> usize {
        self.precision
    }

    /// Sets the number of decimal places for printed lengths.
    pub const fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }
}

const fn default_precision() -> usize {
    1
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        allow_unrecognised: bool,

        #[serde(default = "default_precision")]
        precision: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                allow_unrecognised,
                precision,
            } => Self {
                allow_unrecognised,
                precision,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            allow_unrecognised: config.allow_unrecognised,
            precision: config.precision,
        }
    }
}
