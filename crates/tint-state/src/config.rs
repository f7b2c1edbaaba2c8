#![forbid(unsafe_code)]

//! Palette configuration loaded from TOML or JSON.
//!
//! ```toml
//! # tint.toml
//! [palette]
//! size = 5
//! strategy = "analogous"
//! base = "#3366cc"
//! seed = 42
//! auto_regenerate = true
//!
//! [log]
//! filter = "tint_state=debug"
//! ```
//!
//! ```rust,ignore
//! let config = PaletteConfig::load("tint.toml")?;
//! let store = PaletteStore::from_config(&config)?;
//! ```
//!
//! Every field has a default, so an empty file describes the stock
//! five-slot analogous palette.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tint_color::Rgb;
use tint_scheme::Strategy;

use crate::state::PaletteSize;
use crate::store::StoreOptions;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Initial palette and store behaviour.
    pub palette: PaletteSection,
    /// Log filtering for the command-line front end.
    pub log: LogSection,
}

/// `[palette]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSection {
    /// Number of slots, `3..=6`. Default: 5.
    pub size: usize,
    /// Strategy id. Default: `"analogous"`.
    pub strategy: String,
    /// Seed color for the first generation. Default: random.
    pub base: Option<String>,
    /// RNG seed for reproducible runs. Default: OS entropy.
    pub seed: Option<u64>,
    /// Regenerate when the strategy changes. Default: true.
    pub auto_regenerate: bool,
}

impl Default for PaletteSection {
    fn default() -> Self {
        Self {
            size: PaletteSize::DEFAULT.get(),
            strategy: Strategy::default().id().to_string(),
            base: None,
            seed: None,
            auto_regenerate: true,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// `EnvFilter` directive string, e.g. `"info"` or `"tint_state=debug"`.
    pub filter: Option<String>,
}

impl PaletteConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load a file, picking the format from its extension (`.json` is JSON,
    /// anything else TOML), and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        config.ensure_valid()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = PaletteSize::new(self.palette.size) {
            errors.push(format!("palette.size: {e}"));
        }

        if let Err(e) = self.palette.strategy.parse::<Strategy>() {
            errors.push(format!("palette.strategy: {e}"));
        }

        if let Some(Err(e)) = self.palette.base.as_deref().map(Rgb::parse_hex) {
            errors.push(format!("palette.base: {e}"));
        }

        if self.log.filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            errors.push("log.filter must not be empty".into());
        }

        errors
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Configured palette size.
    pub fn palette_size(&self) -> Result<PaletteSize, ConfigError> {
        PaletteSize::new(self.palette.size)
            .map_err(|e| ConfigError::Validation(vec![format!("palette.size: {e}")]))
    }

    /// Configured strategy; unknown ids fall back to analogous.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        Strategy::from_id_lossy(&self.palette.strategy)
    }

    /// Configured base color, if any.
    pub fn base_color(&self) -> Result<Option<Rgb>, ConfigError> {
        self.palette
            .base
            .as_deref()
            .map(Rgb::parse_hex)
            .transpose()
            .map_err(|e| ConfigError::Validation(vec![format!("palette.base: {e}")]))
    }

    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            auto_regenerate: self.palette.auto_regenerate,
        }
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSer)
    }
}

/// Errors from loading or validating a [`PaletteConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// File read error.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::TomlSer(e) => write!(f, "TOML serialization error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::TomlSer(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
