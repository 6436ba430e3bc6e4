//! Classifier configuration
//!
//! The acceptance threshold and keyword confidence values are product
//! tunables, not hard requirements, so everything here is configurable
//! rather than baked in.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. Built-in defaults
//! 2. Override file in the platform config dir (~/.config/tally/classifier.toml)
//! 3. Environment variables (OLLAMA_HOST, OLLAMA_MODEL,
//!    TALLY_ACCEPT_THRESHOLD, TALLY_CLASSIFIER_TIMEOUT_SECS)

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Settings for the remote classifier layer
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Remote classifier base URL. None means the remote layer is not
    /// configured and the pipeline goes straight to keyword rules.
    pub host: Option<String>,
    /// Model name passed to the classifier service
    pub model: String,
    /// Minimum remote confidence to accept; below this the pipeline falls
    /// back to keyword rules
    pub accept_threshold: f64,
    /// Upper bound on the remote call; the pipeline treats expiry as a
    /// failure and proceeds to the fallback
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            host: None,
            model: "llama3.2".to_string(),
            accept_threshold: 0.6,
            timeout_secs: 10,
        }
    }
}

/// On-disk shape of the override file; every field optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    model: Option<String>,
    accept_threshold: Option<f64>,
    timeout_secs: Option<u64>,
}

impl ClassifierConfig {
    /// Load with full resolution: defaults, then the override file if one
    /// exists, then environment variables. Never fails; a malformed file is
    /// logged and skipped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(contents) => match config.apply_toml(&contents) {
                        Ok(()) => {}
                        Err(e) => warn!("Ignoring malformed {}: {}", path.display(), e),
                    },
                    Err(e) => warn!("Failed to read {}: {}", path.display(), e),
                }
            }
        }

        config.apply_env();
        config
    }

    /// Parse an override file over the current values
    pub fn apply_toml(&mut self, contents: &str) -> Result<()> {
        let file: FileConfig =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;

        if let Some(host) = file.host {
            self.host = Some(host);
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(threshold) = file.accept_threshold {
            self.accept_threshold = threshold.clamp(0.0, 1.0);
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        Ok(())
    }

    /// Environment variables win over the file
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            if !host.is_empty() {
                self.host = Some(host);
            }
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
        if let Ok(threshold) = std::env::var("TALLY_ACCEPT_THRESHOLD") {
            match threshold.parse::<f64>() {
                Ok(t) => self.accept_threshold = t.clamp(0.0, 1.0),
                Err(_) => warn!("Ignoring non-numeric TALLY_ACCEPT_THRESHOLD"),
            }
        }
        if let Ok(secs) = std::env::var("TALLY_CLASSIFIER_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.timeout_secs = s,
                Err(_) => warn!("Ignoring non-numeric TALLY_CLASSIFIER_TIMEOUT_SECS"),
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tally").join("classifier.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.host, None);
        assert_eq!(config.accept_threshold, 0.6);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_apply_toml_partial_override() {
        let mut config = ClassifierConfig::default();
        config
            .apply_toml("host = \"http://localhost:11434\"\naccept_threshold = 0.75\n")
            .unwrap();
        assert_eq!(config.host.as_deref(), Some("http://localhost:11434"));
        assert_eq!(config.accept_threshold, 0.75);
        // Untouched fields keep their defaults
        assert_eq!(config.model, "llama3.2");
    }

    #[test]
    fn test_apply_toml_clamps_threshold() {
        let mut config = ClassifierConfig::default();
        config.apply_toml("accept_threshold = 3.0").unwrap();
        assert_eq!(config.accept_threshold, 1.0);
    }

    #[test]
    fn test_apply_toml_malformed() {
        let mut config = ClassifierConfig::default();
        assert!(config.apply_toml("accept_threshold = \"high\"").is_err());
    }
}
