//! Reader configuration persistence
//!
//! Stores user preferences in `~/.config/csview/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::csv::line_reader::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_LINE_LEN};
use crate::csv::ReadOptions;

/// Defaults applied when reading documents from the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsviewConfig {
    /// Treat the first line as the header
    #[serde(default = "default_has_header")]
    pub has_header: bool,

    /// Line reader refill buffer size in bytes
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Lines longer than this are split into several rows
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

fn default_has_header() -> bool {
    true
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LEN
}

impl Default for CsviewConfig {
    fn default() -> Self {
        Self {
            has_header: default_has_header(),
            buffer_size: default_buffer_size(),
            max_line_length: default_max_line_length(),
        }
    }
}

impl CsviewConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to `config.yaml` in the csview config directory, creating it if needed
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Reader options derived from this config
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            has_header: self.has_header,
            buffer_size: self.buffer_size,
            max_line_len: self.max_line_length,
        }
    }
}

impl From<ReadOptions> for CsviewConfig {
    fn from(options: ReadOptions) -> Self {
        Self {
            has_header: options.has_header,
            buffer_size: options.buffer_size,
            max_line_length: options.max_line_len,
        }
    }
}
