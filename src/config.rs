//! Release configuration loading
//!
//! This module provides:
//! - TOML parsing of `.versionrc.toml`
//! - Custom updater definitions (prefix/suffix or pattern/template)
//! - Resolution of file bindings into an UpdaterRegistry
//! - Defaults for projects without a config file

use crate::error::ConfigError;
use crate::registry::{FileBinding, UpdaterRegistry};
use crate::updater::{Delimited, PatternRule, Updater};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config filename, looked up in the project root
pub const DEFAULT_CONFIG_FILENAME: &str = ".versionrc.toml";

/// Default package file when none is configured
pub const DEFAULT_PACKAGE_FILE: &str = "pyproject.toml";

/// Resolved release configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// File bindings for both phases
    pub registry: UpdaterRegistry,
    /// Lifecycle scripts run by the host
    pub scripts: Scripts,
}

/// Lifecycle scripts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scripts {
    /// Shell command run after every bump file has been written
    pub postbump: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    package_files: Option<Vec<RawBinding>>,
    #[serde(default)]
    bump_files: Vec<RawBinding>,
    #[serde(default)]
    updaters: BTreeMap<String, RawUpdater>,
    #[serde(default)]
    scripts: Scripts,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBinding {
    filename: PathBuf,
    updater: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUpdater {
    prefix: Option<String>,
    suffix: Option<String>,
    pattern: Option<String>,
    template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: UpdaterRegistry::single(FileBinding::new(
                DEFAULT_PACKAGE_FILE,
                Updater::poetry(),
            )),
            scripts: Scripts::default(),
        }
    }
}

impl Config {
    /// Load configuration for a project
    ///
    /// An explicit path must exist. Otherwise `.versionrc.toml` in `root` is
    /// used when present, falling back to the defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILENAME);
                if !candidate.exists() {
                    tracing::debug!(
                        "no {} in {}, using defaults",
                        DEFAULT_CONFIG_FILENAME,
                        root.display()
                    );
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content =
            std::fs::read_to_string(&path).map_err(|e| ConfigError::read_error(&path, e))?;
        tracing::debug!("loading config from {}", path.display());
        Self::from_toml_str(&content, &path)
    }

    /// Parse configuration from TOML text; `path` is used in error messages
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))?;

        let custom = build_custom_updaters(&raw.updaters)?;
        let resolve = |binding: &RawBinding| -> Result<FileBinding, ConfigError> {
            let updater = Updater::builtin(&binding.updater)
                .or_else(|| custom.get(&binding.updater).cloned())
                .ok_or_else(|| ConfigError::unknown_updater(&binding.updater, &binding.filename))?;
            Ok(FileBinding::new(&binding.filename, updater))
        };

        let package_files = match &raw.package_files {
            Some(bindings) => bindings.iter().map(&resolve).collect::<Result<Vec<_>, _>>()?,
            None => vec![FileBinding::new(DEFAULT_PACKAGE_FILE, Updater::poetry())],
        };
        let bump_files = raw
            .bump_files
            .iter()
            .map(&resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            registry: UpdaterRegistry::new(package_files, bump_files)?,
            scripts: raw.scripts,
        })
    }
}

fn build_custom_updaters(
    raw: &BTreeMap<String, RawUpdater>,
) -> Result<BTreeMap<String, Updater>, ConfigError> {
    let mut updaters = BTreeMap::new();

    for (name, definition) in raw {
        if Updater::builtin(name).is_some() {
            return Err(ConfigError::ReservedUpdaterName { name: name.clone() });
        }

        let updater = match (&definition.prefix, &definition.pattern) {
            (Some(prefix), None) => {
                if definition.template.is_some() {
                    return Err(ConfigError::invalid_updater(
                        name,
                        "'template' is only used with 'pattern'",
                    ));
                }
                let suffix = definition.suffix.clone().unwrap_or_default();
                Updater::new(name.clone(), Delimited::new(prefix.clone(), suffix))
            }
            (None, Some(pattern)) => {
                if definition.suffix.is_some() {
                    return Err(ConfigError::invalid_updater(
                        name,
                        "'suffix' is only used with 'prefix'",
                    ));
                }
                let template = definition.template.as_deref().ok_or_else(|| {
                    ConfigError::invalid_updater(name, "'pattern' requires a 'template'")
                })?;
                let rule = PatternRule::new(pattern, template)
                    .map_err(|message| ConfigError::invalid_updater(name, message))?;
                Updater::new(name.clone(), rule)
            }
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid_updater(
                    name,
                    "set either 'prefix' or 'pattern', not both",
                ))
            }
            (None, None) => {
                return Err(ConfigError::invalid_updater(
                    name,
                    "one of 'prefix' or 'pattern' is required",
                ))
            }
        };

        updaters.insert(name.clone(), updater);
    }

    Ok(updaters)
}
