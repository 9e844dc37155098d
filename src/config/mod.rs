//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{config_files, log_files, output_formats};
use crate::core::error::{EvalError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the aggregated TSV tables are written to
    pub output_dir: Option<String>,

    /// First file name segment of experiment logs
    pub log_prefix: Option<String>,

    /// Show a progress bar while scanning logs
    pub show_progress: Option<bool>,

    /// Output format of the significance result (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: Some(config_files::DEFAULT_OUTPUT_DIR.to_string()),
            log_prefix: Some(log_files::DEFAULT_PREFIX.to_string()),
            show_progress: Some(true),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EvalError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            EvalError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        Self::load_from_dir(Path::new("."))
    }

    /// Load the first valid config file in `dir` or up to
    /// `MAX_PARENT_LEVELS` of its parents, else the defaults.
    ///
    /// A file that exists but does not load is skipped with a warning.
    pub fn load_from_dir(dir: &Path) -> Self {
        for i in 0..=config_files::MAX_PARENT_LEVELS {
            let path = dir.join("../".repeat(i)).join(config_files::FILE_NAME);
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => warn!("Ignoring config file '{}': {e}", path.display()),
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref output_dir) = cli_config.output_dir {
            self.output_dir = Some(output_dir.clone());
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if cli_config.no_progress || cli_config.quiet {
            self.show_progress = Some(false);
        }
    }

    pub fn output_dir_path(&self) -> PathBuf {
        PathBuf::from(
            self.output_dir
                .as_deref()
                .unwrap_or(config_files::DEFAULT_OUTPUT_DIR),
        )
    }

    pub fn log_prefix(&self) -> &str {
        self.log_prefix
            .as_deref()
            .unwrap_or(log_files::DEFAULT_PREFIX)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref output_dir) = self.output_dir
            && output_dir.trim().is_empty()
        {
            return Err(EvalError::Config(
                "Output directory cannot be empty.".to_string(),
            ));
        }

        if let Some(ref prefix) = self.log_prefix {
            if prefix.is_empty() {
                return Err(EvalError::Config("Log prefix cannot be empty.".to_string()));
            }
            if prefix.contains(log_files::SEGMENT_SEPARATOR) {
                return Err(EvalError::Config(format!(
                    "Log prefix '{prefix}' cannot contain '{}'.",
                    log_files::SEGMENT_SEPARATOR
                )));
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(EvalError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub output_dir: Option<String>,    // --output-dir
    pub output_format: Option<String>, // --format

    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}
