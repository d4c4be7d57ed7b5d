//! Configuration file discovery and merging.
//!
//! Settings can live in a `schemalint.toml` next to the schemas:
//!
//! ```toml
//! profile = "scale"
//! property_case = "snake_case"
//! max_union_variants = 12
//! max_union_depth = 3
//! discriminator_fields = ["kind", "type"]
//! ```
//!
//! Every key is optional. Precedence: CLI > config file > defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LintError;
use crate::types::{Config, Profile, PropertyCase};

/// Name of the configuration file looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "schemalint.toml";

/// Raw settings as written in a config file or given on the command line.
///
/// Names are kept as strings until [`Settings::resolve`] so that invalid
/// values are reported the same way wherever they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub profile: Option<String>,
    pub property_case: Option<String>,
    pub max_union_variants: Option<usize>,
    pub max_union_depth: Option<usize>,
    pub discriminator_fields: Option<Vec<String>>,
}

impl Settings {
    /// Parse settings from TOML text. `path` is only used in errors.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, LintError> {
        toml::from_str(content).map_err(|source| LintError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a file.
    ///
    /// # Errors
    ///
    /// Returns `LintError::FileNotFound`, `LintError::ReadError`, or
    /// `LintError::ConfigParse`.
    pub fn load(path: &Path) -> Result<Self, LintError> {
        if !path.exists() {
            return Err(LintError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| LintError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: Settings) -> Settings {
        Settings {
            profile: self.profile.or(fallback.profile),
            property_case: self.property_case.or(fallback.property_case),
            max_union_variants: self.max_union_variants.or(fallback.max_union_variants),
            max_union_depth: self.max_union_depth.or(fallback.max_union_depth),
            discriminator_fields: self.discriminator_fields.or(fallback.discriminator_fields),
        }
    }

    /// Build a [`Config`], using defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns `LintError::UnknownProfile` or `LintError::UnknownPropertyCase`
    /// for unrecognized names.
    pub fn resolve(self) -> Result<Config, LintError> {
        let mut config = Config::default();
        if let Some(name) = self.profile {
            config.profile = Profile::parse(&name)?;
        }
        if let Some(name) = self.property_case {
            config.property_case = PropertyCase::parse(&name)?;
        }
        if let Some(max) = self.max_union_variants {
            config.max_union_variants = max;
        }
        if let Some(max) = self.max_union_depth {
            config.max_union_depth = max;
        }
        if let Some(fields) = self.discriminator_fields {
            config.discriminator_fields = fields;
        }
        Ok(config)
    }
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory containing `schemalint.toml` or a `.git`
/// directory (a repository root without a config file yields `None`).
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            return None;
        }
        current = dir.parent();
    }
    None
}

/// Resolve the effective configuration.
///
/// An explicit `config_path` must exist; otherwise the file is discovered
/// from `start`. Fields set in `cli` win over the file.
///
/// # Errors
///
/// Returns config file errors or unknown-name errors from
/// [`Settings::resolve`].
pub fn resolve_config(
    cli: Settings,
    config_path: Option<&Path>,
    start: &Path,
) -> Result<Config, LintError> {
    let file_settings = match config_path {
        Some(path) => Settings::load(path)?,
        None => match find_config_file(start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered config file");
                Settings::load(&path)?
            }
            None => Settings::default(),
        },
    };

    cli.or(file_settings).resolve()
}
