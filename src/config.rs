// SPDX-License-Identifier: MIT
//
// TOML configuration. Every field has a default, so an empty file (or no
// file at all) is a valid configuration:
//
//   [analysis]
//   use_cache = true
//   sentiment = "lexical"        # or "keyword-ratio"
//   segment_size = 50
//   parallel = true
//
//   [theme]
//   default_template = "typewriter"
//   builtin_themes = true
//
//   [logging]
//   level = "info"

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tinct_analysis::SentimentBackend;
use tinct_theme::TYPEWRITER;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub theme: ThemeSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Default for [`Pipeline::analyze`](crate::Pipeline::analyze).
    pub use_cache: bool,
    pub sentiment: SentimentBackend,
    /// Words per emotional-trajectory window.
    pub segment_size: usize,
    /// Run detector and classifier, and batches, on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            sentiment: SentimentBackend::default(),
            segment_size: 50,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Template used when a request names none.
    pub default_template: String,
    /// Preload the builtin predefined themes.
    pub builtin_themes: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            default_template: TYPEWRITER.to_string(),
            builtin_themes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `TINCT_LOG` overrides it.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Config {
    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Toml`] if it does
    /// not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// [`Error::Toml`] on malformed input or unknown enum values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
