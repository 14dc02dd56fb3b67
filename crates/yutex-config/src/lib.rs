//! Yutex Config
//!
//! This crate handles configuration loading and management
//! for yutex, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/yutex/config.toml`
//! - macOS: `~/Library/Application Support/yutex/config.toml`
//! - Windows: `%APPDATA%\yutex\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use yutex_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod lexer;
mod palette;

pub use lexer::{LexerConfig, FALLBACK_LANGUAGE};
pub use palette::{parse_hex, PaletteConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use yutex_core::{Result, YutexError};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r##"[lexer]
DefaultLanguage = "text"
Embedded        = true

[palette]
Tag         = "#c678dd"
Plain       = "#abb2bf"
Comment     = "#7f848e"
Number      = "#d19a66"
Link        = "#61afef"
String      = "#98c379"
Formula     = "#e5c07b"
Markup      = "#e06c75"
Raw         = "#dcdfe4"
Keyword     = "#c678dd"
Type        = "#e5c07b"
Function    = "#61afef"
Variable    = "#e06c75"
Operator    = "#56b6c2"
Punctuation = "#abb2bf"
Constant    = "#d19a66"
"##;

/// Main configuration structure.
///
/// Contains all configuration sections for yutex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Lexer configuration
    #[serde(default)]
    pub lexer: LexerConfig,

    /// Token colors
    #[serde(default)]
    pub palette: PaletteConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use yutex_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[lexer]"));
    /// assert!(toml.contains("[palette]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "yutex")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "yutex").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// Values missing from the file keep their defaults. If no config file
    /// exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                config.merge(&Self::load_from(&config_path)?);
            }
        }
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// Only the values set in the file are present in the result; merge it
    /// into [`Config::default`] to fill in the rest.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| YutexError::Config(format!("Parse error in {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` is provided:
    ///    - If it's a path to an existing file, load and merge it
    ///    - Otherwise, treat it as a TOML string and parse it
    ///
    /// # Example
    ///
    /// ```no_run
    /// use yutex_config::Config;
    ///
    /// let config = Config::load_with_override(Some("[lexer]\nEmbedded = false")).unwrap();
    /// assert!(!config.lexer.embedded());
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            let override_path = Path::new(override_str);

            let override_config = if override_path.exists() {
                Self::load_from(override_path)?
            } else {
                Self::parse(override_str)?
            };

            config.merge(&override_config);
        }

        Ok(config)
    }

    /// Parse and validate a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| YutexError::Config(format!("Override parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Merge another config into this one.
    ///
    /// Values set in `other` take precedence over values in `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use yutex_config::Config;
    ///
    /// let mut base = Config::default();
    /// let override_config: Config = toml::from_str(r#"
    ///     [lexer]
    ///     DefaultLanguage = "rust"
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert_eq!(base.lexer.default_language(), "rust");
    /// assert!(base.lexer.embedded());
    /// ```
    pub fn merge(&mut self, other: &Config) {
        self.lexer.merge(&other.lexer);
        self.palette.merge(&other.palette);
    }

    /// Check palette keys and colors.
    pub fn validate(&self) -> Result<()> {
        self.palette.validate()
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| YutexError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}
