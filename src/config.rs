//! Configuration loading for the traceback formatter.
//!
//! Loads an optional `config.toml` with per-section defaults. All sections use
//! `#[serde(default)]` so a minimal or empty config file is valid. Command-line
//! flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::highlight::DEFAULT_THEME;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Line processor behavior.
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// Syntax highlighting of code and variable lines.
    #[serde(default)]
    pub highlight: HighlightConfig,
}

/// Settings consumed by [`crate::Processor`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    /// Directory of the code to highlight. Empty means the working directory.
    #[serde(default)]
    pub code_dir: String,

    /// Only style traceback lines that refer to files under `code_dir`.
    #[serde(default = "default_true")]
    pub isolate: bool,

    /// Print captured local variable lines.
    #[serde(default = "default_true")]
    pub show_variables: bool,

    /// Visible characters kept from a variable line before truncating.
    #[serde(default = "default_max_variable_line_length")]
    pub max_variable_line_length: usize,

    /// Treat paths that are not absolute as project code.
    #[serde(default = "default_true")]
    pub relative_paths_of_interest: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            code_dir: String::new(),
            isolate: true,
            show_variables: true,
            max_variable_line_length: default_max_variable_line_length(),
            relative_paths_of_interest: true,
        }
    }
}

impl ProcessorConfig {
    /// Return `code_dir`, falling back to the current working directory.
    pub fn resolved_code_dir(&self) -> String {
        if !self.code_dir.is_empty() {
            return self.code_dir.clone();
        }
        match std::env::current_dir() {
            Ok(dir) => dir.to_string_lossy().into_owned(),
            Err(e) => {
                warn!(error = %e, "cannot determine working directory, isolating nothing");
                String::new()
            }
        }
    }
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    /// Highlight code and variable lines.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Name of a bundled syntect theme.
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: default_theme(),
        }
    }
}

impl Config {
    /// Validate that configuration values are within sane bounds.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.processor.max_variable_line_length >= 1,
            "processor.max_variable_line_length must be >= 1"
        );
        anyhow::ensure!(
            !self.highlight.theme.trim().is_empty(),
            "highlight.theme must not be empty"
        );
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Resolve the default config file (`<config dir>/tbvaccine/config.toml`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(base.config_dir().join("tbvaccine").join("config.toml"))
}

/// Load the default config file, or defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed, or validated.
pub fn load_default_config() -> anyhow::Result<Config> {
    let path = match default_config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "no config directory, using defaults");
            return Ok(Config::default());
        }
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config(&path)
}

// Default value functions for serde.

fn default_true() -> bool {
    true
}

fn default_max_variable_line_length() -> usize {
    // Four 79-column lines.
    316
}

fn default_theme() -> String {
    DEFAULT_THEME.to_owned()
}
