//! # Configuration Module
//!
//! This module provides configuration support for headercheck, allowing users
//! to change the copyright holder, the license identifier and the first year of
//! the header, and to register additional file families.
//!
//! Configuration can be specified in a `.headercheck.toml` file or via the
//! `HEADERCHECK_CONFIG` environment variable.
//!
//! ```toml
//! [header]
//! holder = "Intel Corporation"
//! license = "Apache-2.0"
//! first-year = 2018
//!
//! [families.cmake]
//! extensions = ["cmake"]
//! comment-prefix = "#"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::header::HeaderTemplate;
use crate::policy::{FileFamily, HeaderPolicy, PolicyTable};
use crate::rules::HeaderRules;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headercheck.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERCHECK_CONFIG";

/// Overrides for the header text. Unset fields keep their defaults.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct HeaderConfig {
  /// Copyright holder named on the first header line.
  #[serde(default)]
  pub holder: Option<String>,

  /// SPDX license identifier named on the second header line.
  #[serde(default)]
  pub license: Option<String>,

  /// First year of the copyright range.
  #[serde(default)]
  pub first_year: Option<i32>,
}

/// User-defined file family.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FamilyConfig {
  /// File extensions without the leading dot (e.g., "cmake").
  pub extensions: Vec<String>,

  /// Line-comment prefix used by the header (e.g., "#" or "//").
  pub comment_prefix: String,

  /// Whether a bare comment line follows the SPDX line.
  #[serde(default)]
  pub extra_blank_line: bool,

  /// Whether files may start with an encoding declaration.
  #[serde(default)]
  pub encoding_declaration: bool,
}

/// Main configuration struct for headercheck.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub header: HeaderConfig,

  /// Additional families, keyed by name. Registered in name order after the
  /// built-in ones.
  #[serde(default)]
  pub families: BTreeMap<String, FamilyConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The `[header]` section is invalid.
  #[error("Invalid header configuration: {message}")]
  InvalidHeader { message: String },

  /// A family definition is invalid.
  #[error("Invalid file family '{family}': {message}")]
  InvalidFamily { family: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read or
  /// parsed.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} file family definitions", config.families.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Holder and license, when given, are non-empty
  /// - Every family has a non-empty comment prefix and at least one extension
  /// - Extension names don't include the leading dot
  fn validate(&self) -> Result<(), ConfigError> {
    if self.header.holder.as_deref().is_some_and(|h| h.trim().is_empty()) {
      return Err(ConfigError::InvalidHeader {
        message: "holder cannot be empty".to_string(),
      });
    }
    if self.header.license.as_deref().is_some_and(|l| l.trim().is_empty()) {
      return Err(ConfigError::InvalidHeader {
        message: "license cannot be empty".to_string(),
      });
    }

    for (name, family) in &self.families {
      if family.comment_prefix.is_empty() {
        return Err(ConfigError::InvalidFamily {
          family: name.clone(),
          message: "comment-prefix cannot be empty".to_string(),
        });
      }

      if family.extensions.is_empty() {
        return Err(ConfigError::InvalidFamily {
          family: name.clone(),
          message: "extensions cannot be empty".to_string(),
        });
      }

      for ext in &family.extensions {
        if ext.is_empty() || ext.starts_with('.') {
          return Err(ConfigError::InvalidFamily {
            family: name.clone(),
            message: format!("extension '{ext}' should be non-empty and not include a leading dot"),
          });
        }
      }
    }

    Ok(())
  }

  /// The header template with this configuration's overrides applied.
  pub fn template(&self) -> HeaderTemplate {
    let defaults = HeaderTemplate::default();
    HeaderTemplate {
      holder: self.header.holder.clone().unwrap_or(defaults.holder),
      license: self.header.license.clone().unwrap_or(defaults.license),
      first_year: self.header.first_year.unwrap_or(defaults.first_year),
    }
  }

  /// The built-in policy table extended with the configured families.
  pub fn policy_table(&self) -> PolicyTable {
    let mut table = PolicyTable::builtin();
    for (name, family) in &self.families {
      table.register(FileFamily {
        name: name.clone(),
        extensions: family.extensions.iter().map(|ext| format!(".{ext}")).collect(),
        policy: HeaderPolicy::new(
          &family.comment_prefix,
          family.extra_blank_line,
          family.encoding_declaration,
        ),
      });
    }
    table
  }

  /// Builds the rules for a run in `year`.
  ///
  /// Fails if the configured first year lies after `year`, since the header
  /// would then carry a reversed range.
  pub fn rules(&self, year: i32) -> Result<HeaderRules, ConfigError> {
    let template = self.template();
    if template.first_year > year {
      return Err(ConfigError::InvalidHeader {
        message: format!("first-year {} is after the current year {year}", template.first_year),
      });
    }
    Ok(HeaderRules::new(self.policy_table(), template, year))
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERCHECK_CONFIG` environment variable
/// 3. `.headercheck.toml` in the working directory
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  // A missing explicit path is still returned so loading reports it.
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check working directory
  let workspace_config = workspace_root.join(DEFAULT_CONFIG_FILENAME);
  if workspace_config.exists() {
    verbose_log!("Using workspace config: {}", workspace_config.display());
    return Some(workspace_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `workspace_root` - Directory searched for the default config file
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is found.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, workspace_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
