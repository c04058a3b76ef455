//! Configuration for quill.
//!
//! Configuration is loaded from `~/.config/quill/config.toml` and provides
//! input, key binding and logging settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use etcetera::BaseStrategy;
use serde::Deserialize;

use crate::source::KEY_BUFFER_SIZE;

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    pub input: InputConfig,
    /// Extra bindings, notation to command name, applied over the defaults.
    pub keys: BTreeMap<String, String>,
    pub logging: LoggingConfig,
}

/// Key input configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Capacity of the pushback stack.
    pub key_buffer_size: usize,
    /// Bind printable characters to `self-insert-command`.
    pub self_insert_printable: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            key_buffer_size: KEY_BUFFER_SIZE,
            self_insert_printable: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            level: "info".to_string(),
        }
    }
}

impl QuillConfig {
    /// Path of the default configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let strategy = etcetera::choose_base_strategy()
            .context("could not determine the configuration directory")?;
        Ok(strategy.config_dir().join("quill").join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Falls back to defaults if the file doesn't exist.
    /// Returns an error only if the file exists but is malformed.
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str::<QuillConfig>(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Add a binding applied after the defaults.
    #[must_use]
    pub fn with_key_binding(
        mut self,
        notation: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        self.keys.insert(notation.into(), command.into());
        self
    }

    /// Set the pushback capacity.
    #[must_use]
    pub fn with_key_buffer_size(mut self, size: usize) -> Self {
        self.input.key_buffer_size = size;
        self
    }

    /// Set the log file path.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.logging.log_file = Some(path.into());
        self
    }

    /// Set the log level (e.g., "info", "debug", "warn").
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = QuillConfig::default();
        assert_eq!(config.input.key_buffer_size, 16);
        assert!(config.input.self_insert_printable);
        assert!(config.keys.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_file.is_none());
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = QuillConfig::default()
            .with_key_binding("\\C-cw", "where-is")
            .with_key_buffer_size(4)
            .with_log_file("/tmp/quill.log")
            .with_log_level("debug");

        assert_eq!(config.keys.get("\\C-cw").map(String::as_str), Some("where-is"));
        assert_eq!(config.input.key_buffer_size, 4);
        assert_eq!(config.logging.log_file, Some(PathBuf::from("/tmp/quill.log")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn deserialize_partial_config() {
        let toml_str = r#"
[input]
self_insert_printable = false

[keys]
"\\C-xg" = "goto-line"
"\\F5" = "call-last-kbd-macro"
"#;
        let config = toml::from_str::<QuillConfig>(toml_str).expect("should deserialize");
        assert!(!config.input.self_insert_printable);
        // Buffer size should be default
        assert_eq!(config.input.key_buffer_size, 16);
        assert_eq!(config.keys.len(), 2);
        assert_eq!(
            config.keys.get("\\F5").map(String::as_str),
            Some("call-last-kbd-macro")
        );
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[logging]\nlevel = \"trace\"").expect("write config");

        let config = QuillConfig::load_from(file.path()).expect("should load");
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.input.key_buffer_size, 16);
    }

    #[test]
    fn load_from_malformed_file_returns_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[input\nkey_buffer_size = ").expect("write config");
        assert!(QuillConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn load_from_nonexistent_path_returns_error() {
        let result = QuillConfig::load_from(Path::new("/nonexistent/quill.toml"));
        assert!(result.is_err());
    }
}
