//! YAML Configuration File Support for TextGuard
//!
//! Loads every stage configuration (normalizer, fingerprinting, matching and
//! report policy) from a single YAML file. Omitted sections and fields fall
//! back to the library defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # TextGuard configuration
//! version: "1.0"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: false
//!   max_tokens: 1000000
//!
//! perceptual:
//!   version: 1
//!   n: 3
//!   w: 3
//!   base: 131
//!   mod1: 1000000007
//!   mod2: 1000000009
//!   use_parallel: true
//!
//! matcher:
//!   version: 1
//!   top_k: 5
//!   filter_bits: 1000000
//!   table_capacity: 1024
//!
//! report:
//!   critical_threshold: 25.0
//!   max_phrase_display: 80
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CanonicalizeConfig, MatchConfig, PerceptualConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for a comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TextGuardConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub perceptual: PerceptualYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl TextGuardConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TextGuardConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.perceptual.validate()?;
        self.matcher.validate()?;
        self.report.validate()?;

        Ok(())
    }

    pub fn canonical_config(&self) -> CanonicalizeConfig {
        self.canonical.to_config()
    }

    pub fn perceptual_config(&self) -> PerceptualConfig {
        self.perceptual.to_config()
    }

    pub fn match_config(&self) -> MatchConfig {
        self.matcher.to_config()
    }
}

impl Default for TextGuardConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            perceptual: PerceptualYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Normalizer YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub normalize_unicode: bool,

    #[serde(default)]
    pub max_tokens: Option<usize>,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))
    }

    fn to_config(&self) -> CanonicalizeConfig {
        CanonicalizeConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
            max_tokens: None,
        }
    }
}

/// Fingerprinting YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptualYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_n")]
    pub n: usize,

    #[serde(default = "default_w")]
    pub w: usize,

    #[serde(default = "default_base")]
    pub base: u64,

    #[serde(default = "default_mod1")]
    pub mod1: u64,

    #[serde(default = "default_mod2")]
    pub mod2: u64,

    #[serde(default)]
    pub use_parallel: bool,
}

impl PerceptualYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("perceptual: {err}")))
    }

    fn to_config(&self) -> PerceptualConfig {
        PerceptualConfig {
            version: self.version,
            n: self.n,
            w: self.w,
            base: self.base,
            mod1: self.mod1,
            mod2: self.mod2,
            use_parallel: self.use_parallel,
        }
    }
}

impl Default for PerceptualYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            n: default_n(),
            w: default_w(),
            base: default_base(),
            mod1: default_mod1(),
            mod2: default_mod2(),
            use_parallel: false,
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default = "default_filter_bits")]
    pub filter_bits: u32,

    #[serde(default = "default_table_capacity")]
    pub table_capacity: usize,

    #[serde(default = "default_max_table_capacity")]
    pub max_table_capacity: usize,
}

impl MatchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))
    }

    fn to_config(&self) -> MatchConfig {
        MatchConfig {
            version: self.version,
            top_k: self.top_k,
            filter_bits: self.filter_bits,
            table_capacity: self.table_capacity,
            max_table_capacity: self.max_table_capacity,
        }
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        let defaults = MatchConfig::default();
        Self {
            version: defaults.version,
            top_k: defaults.top_k,
            filter_bits: defaults.filter_bits,
            table_capacity: defaults.table_capacity,
            max_table_capacity: defaults.max_table_capacity,
        }
    }
}

/// How a comparison is judged and presented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Scores strictly above this percentage are flagged critical.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,

    /// Truncate displayed phrases to this many characters. `None` shows
    /// phrases in full.
    #[serde(default)]
    pub max_phrase_display: Option<usize>,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.critical_threshold.is_finite() || self.critical_threshold < 0.0 {
            return Err(ConfigLoadError::Validation(
                "report.critical_threshold must be a finite, non-negative percentage".to_string(),
            ));
        }
        if self.max_phrase_display == Some(0) {
            return Err(ConfigLoadError::Validation(
                "report.max_phrase_display must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            critical_threshold: default_critical_threshold(),
            max_phrase_display: None,
        }
    }
}

// Helper functions for serde defaults

fn default_version() -> u32 {
    1
}

fn default_n() -> usize {
    3
}

fn default_w() -> usize {
    3
}

fn default_base() -> u64 {
    131
}

fn default_mod1() -> u64 {
    1_000_000_007
}

fn default_mod2() -> u64 {
    1_000_000_009
}

fn default_top_k() -> usize {
    MatchConfig::default().top_k
}

fn default_filter_bits() -> u32 {
    MatchConfig::default().filter_bits
}

fn default_table_capacity() -> usize {
    MatchConfig::default().table_capacity
}

fn default_max_table_capacity() -> usize {
    MatchConfig::default().max_table_capacity
}

fn default_critical_threshold() -> f64 {
    25.0
}
