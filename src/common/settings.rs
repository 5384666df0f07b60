//! Writer settings.
//!
//! Settings travel with a [`Document`](crate::document::Document) and are read
//! by the package writers. They can be built in code or loaded from YAML.
//!
//! # Examples
//!
//! ```rust
//! use quillpack::common::{Compression, Settings};
//!
//! let settings = Settings::new()
//!     .with_default_font("Calibri", 11.0)
//!     .with_compression(Compression::Stored)
//!     .with_strict_style_names(true);
//! assert_eq!(settings.default_font_name, "Calibri");
//! ```
use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How parts are stored inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Deflate every part (the `mimetype` entry of ODT is always stored)
    #[default]
    Deflated,
    /// Store parts uncompressed
    Stored,
}

/// Configuration options for building and saving documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    /// Font family written into the document defaults
    pub default_font_name: String,
    /// Font size in points written into the document defaults
    pub default_font_size: f64,
    /// Directory used to stage archives written to streams
    pub temp_dir: Option<PathBuf>,
    /// Fail on style names that are not registered instead of passing them through
    pub strict_style_names: bool,
    /// Archive compression
    pub compression: Compression,
    /// Emit markup compatible with older word processors where the formats differ
    pub compatibility: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_font_name: "Arial".to_string(),
            default_font_size: 10.0,
            temp_dir: None,
            strict_style_names: false,
            compression: Compression::Deflated,
            compatibility: true,
        }
    }
}

impl Settings {
    /// Create settings with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default font family and size (in points).
    #[inline]
    pub fn with_default_font(mut self, name: impl Into<String>, size: f64) -> Self {
        self.default_font_name = name.into();
        self.default_font_size = size;
        self
    }

    /// Set the staging directory for stream targets.
    #[inline]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Set whether unknown style names are an error at write time.
    #[inline]
    pub fn with_strict_style_names(mut self, strict: bool) -> Self {
        self.strict_style_names = strict;
        self
    }

    /// Set the archive compression.
    #[inline]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the compatibility flag.
    #[inline]
    pub fn with_compatibility(mut self, compatibility: bool) -> Self {
        self.compatibility = compatibility;
        self
    }

    /// Parse settings from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings =
            serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&yaml)
    }

    /// Staging directory for stream targets.
    pub fn staging_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    fn validate(&self) -> Result<()> {
        if self.default_font_name.trim().is_empty() {
            return Err(Error::Config("default_font_name must not be empty".to_string()));
        }
        if !(self.default_font_size.is_finite() && self.default_font_size > 0.0) {
            return Err(Error::Config(format!(
                "default_font_size must be positive, got {}",
                self.default_font_size
            )));
        }
        Ok(())
    }
}
