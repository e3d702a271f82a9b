//! Configuration loading and validation for Amalgam.
//!
//! An amalgamation is described by one TOML file (`amalgam.toml` by
//! default) holding the names, include rules and the ordered manifest.
//! Inclusion order is load-bearing, so nothing here discovers files: every
//! entry is listed explicitly.

use amalgam_core::{Entry, IncludeRule, Manifest};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "amalgam.toml";

/// The root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmalgamConfig {
    /// Repository / library name shown in banners and guard checks
    pub repo: String,

    /// Macro a single translation unit defines to compile the sources
    pub definition_macro: String,

    /// Include guard wrapped around the whole output
    pub outer_guard: String,

    /// Directory manifest paths are resolved against. Relative values are
    /// resolved against the configuration file's directory.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Directory shown between the repo name and included paths
    #[serde(default = "default_include_root")]
    pub include_root: String,

    /// Extensions (without the dot) of compiled-source files
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Default output path for `amalgam build`, resolved like `root_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Include-rewrite rules, tried in order
    #[serde(default)]
    pub include_rules: Vec<IncludeRule>,

    /// The ordered manifest
    #[serde(default)]
    pub entries: Manifest,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_include_root() -> String {
    "src".into()
}
fn default_source_extensions() -> Vec<String> {
    vec!["c".into(), "cpp".into()]
}

impl AmalgamConfig {
    /// Load configuration from a file.
    ///
    /// Unlike most tools a missing file is an error: there is no meaningful
    /// default manifest.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::parse(&content, base_dir).map_err(|e| match e {
            ConfigError::ParseError { reason, .. } => ConfigError::ParseError {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        tracing::debug!(
            path = %path.display(),
            entries = config.entries.len(),
            rules = config.include_rules.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration text, resolving a relative
    /// `root_dir` or `output` against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;

        if config.root_dir.is_relative() {
            config.root_dir = base_dir.join(&config.root_dir);
        }
        if let Some(output) = config.output.take() {
            config.output = Some(if output.is_relative() {
                base_dir.join(output)
            } else {
                output
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the root directory (CLI flag / environment override).
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repo.trim().is_empty() {
            return Err(ConfigError::ValidationError("repo must not be empty".into()));
        }

        for (field, value) in [
            ("definition_macro", &self.definition_macro),
            ("outer_guard", &self.outer_guard),
        ] {
            if !is_c_identifier(value) {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must be a C identifier, got '{value}'"
                )));
            }
        }

        if self.entries.is_empty() {
            return Err(ConfigError::ValidationError(
                "manifest has no entries".into(),
            ));
        }

        for entry in &self.entries {
            if let Some(path) = entry.path() {
                if path.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "{} entry has an empty path",
                        entry.kind()
                    )));
                }
                if Path::new(path).is_absolute() {
                    return Err(ConfigError::ValidationError(format!(
                        "entry path '{path}' must be relative to root_dir"
                    )));
                }
            }
        }

        if let Some(ext) = self
            .source_extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::ValidationError(format!(
                "source extension '{ext}' must be non-empty and given without the dot"
            )));
        }

        if self.include_rules.is_empty() {
            tracing::warn!("No include rules configured; no include line will be rewritten");
        }

        self.entries.validate_guards()?;
        Ok(())
    }

    /// Generate a starter config TOML string (for `amalgam init`).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AmalgamConfig {
    fn default() -> Self {
        Self {
            repo: "mylib".into(),
            definition_macro: "MYLIB_SINGLE_HEADER_IMPL".into(),
            outer_guard: "MYLIB_SINGLE_HEADER_H_".into(),
            root_dir: default_root_dir(),
            include_root: default_include_root(),
            source_extensions: default_source_extensions(),
            output: Some(PathBuf::from("mylib_all.h")),
            include_rules: vec![IncludeRule::new(r#"^\s*#\s*include "(mylib/.*)".*$"#)],
            entries: Manifest::new(vec![
                Entry::text(
                    "mylib - single header distribution\n\n\
                     Define MYLIB_SINGLE_HEADER_IMPL in exactly one source file.",
                ),
                Entry::commented("LICENSE.txt"),
                Entry::inline("src/mylib/config.h"),
                Entry::inline("src/mylib/mylib.h"),
                Entry::inline("src/mylib/mylib.c"),
            ]),
        }
    }
}

/// Whether `s` is a valid C preprocessor identifier.
fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] amalgam_core::Error),
}
