//! Bump workflow for propagating a release version
//!
//! This module provides:
//! - Workflow coordination: read current version → plan rewrites → write → post-bump script
//! - Dry-run mode support
//! - All-or-nothing planning: every file is read and rewritten in memory
//!   before anything is written

use crate::config::Config;
use crate::error::{BumpError, ConfigError};
use crate::registry::UpdaterRegistry;
use crate::script::{ScriptResult, ScriptRunner, SystemShell};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of rewriting one bump file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// The version line was rewritten
    Updated,
    /// The file already carries the new version
    UpToDate,
    /// No version marker was found; content left unchanged
    MarkerMissing,
}

impl ChangeStatus {
    /// Returns the display label for this status
    pub fn label(&self) -> &'static str {
        match self {
            ChangeStatus::Updated => "updated",
            ChangeStatus::UpToDate => "up to date",
            ChangeStatus::MarkerMissing => "no version marker",
        }
    }
}

/// Planned change to one bump file
#[derive(Debug, Clone)]
pub struct FileChange {
    /// Path as configured, relative to the project root
    pub path: PathBuf,
    /// Name of the convention used for this file
    pub convention: String,
    /// Whether this file is also a package file
    pub package_file: bool,
    /// Version found before the rewrite, if any
    pub previous_version: Option<String>,
    /// Outcome of the rewrite
    pub status: ChangeStatus,
    /// Content read from disk
    pub original: String,
    /// Content to write back
    pub updated: String,
}

impl FileChange {
    /// Returns true if the file needs to be written
    pub fn needs_write(&self) -> bool {
        self.status == ChangeStatus::Updated
    }
}

/// Planned rewrites for every bump file, in registration order
#[derive(Debug, Clone)]
pub struct BumpPlan {
    /// Version being adopted
    pub new_version: String,
    /// One entry per bump file
    pub changes: Vec<FileChange>,
}

impl BumpPlan {
    /// Count of files with the given status
    pub fn count(&self, status: ChangeStatus) -> usize {
        self.changes.iter().filter(|c| c.status == status).count()
    }
}

/// Options controlling a bump run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpOptions {
    /// Compute rewrites without writing files or running scripts
    pub dry_run: bool,
    /// Treat a bump file without a version marker as an error
    pub strict: bool,
    /// Run the configured post-bump script
    pub run_script: bool,
}

/// Result of a complete bump run
#[derive(Debug, Clone)]
pub struct BumpReport {
    /// Version read from the package files before the bump
    pub current_version: String,
    /// Planned rewrites
    pub plan: BumpPlan,
    /// Files actually written
    pub written: Vec<PathBuf>,
    /// Post-bump script outcome, if it ran
    pub script: Option<ScriptResult>,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

impl BumpReport {
    /// Returns true if the post-bump script ran and failed
    pub fn script_failed(&self) -> bool {
        self.script.as_ref().is_some_and(|s| !s.success)
    }
}

/// Host for reading and rewriting version files under a project root
pub struct Bumper {
    /// Project root that bound paths are relative to
    root: PathBuf,
    /// Resolved configuration
    config: Config,
}

impl Bumper {
    /// Create a new bumper for a project root
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Returns the file bindings in use
    pub fn registry(&self) -> &UpdaterRegistry {
        &self.config.registry
    }

    /// Read the current version from the package files
    ///
    /// When several package files disagree, the first one wins and the
    /// disagreement is logged.
    pub fn current_version(&self) -> Result<String, BumpError> {
        let mut current: Option<(PathBuf, String)> = None;

        for binding in self.registry().package_files() {
            let content = self.read(&binding.path)?;
            let version = binding.updater.read_version(&content).map_err(|source| {
                BumpError::VersionNotFound {
                    path: binding.path.clone(),
                    source,
                }
            })?;
            tracing::debug!("{} is at {}", binding.path.display(), version);

            if let Some((first_path, first_version)) = &current {
                if *first_version != version {
                    tracing::warn!(
                        "{} has version {} but {} has {}; using {}",
                        binding.path.display(),
                        version,
                        first_path.display(),
                        first_version,
                        first_version
                    );
                }
                continue;
            }
            current = Some((binding.path.clone(), version));
        }

        current
            .map(|(_, version)| version)
            .ok_or(BumpError::Config(ConfigError::NoPackageFiles))
    }

    /// Compute the new content of every bump file without writing anything
    pub fn plan(&self, new_version: &str, strict: bool) -> Result<BumpPlan, BumpError> {
        // versions are matched line by line, so a line break would split the marker
        if new_version.contains(['\n', '\r']) {
            return Err(BumpError::invalid_version(new_version));
        }

        let registry = self.registry();
        let mut changes = Vec::new();

        registry.try_for_each_bump_file(|path, updater| -> Result<(), BumpError> {
            let original = self.read(path)?;
            let previous_version = updater.read_version(&original).ok();

            let (status, updated) = match updater.try_write_version(&original, new_version) {
                Some(updated) if updated == original => (ChangeStatus::UpToDate, updated),
                Some(updated) => (ChangeStatus::Updated, updated),
                None => {
                    if strict {
                        return Err(BumpError::MarkerMissing {
                            path: path.to_path_buf(),
                            convention: updater.name().to_string(),
                        });
                    }
                    tracing::warn!(
                        "no '{}' version marker in {}, leaving it unchanged",
                        updater.name(),
                        path.display()
                    );
                    (ChangeStatus::MarkerMissing, original.clone())
                }
            };

            changes.push(FileChange {
                path: path.to_path_buf(),
                convention: updater.name().to_string(),
                package_file: registry.is_package_file(path),
                previous_version,
                status,
                original,
                updated,
            });
            Ok(())
        })?;

        Ok(BumpPlan {
            new_version: new_version.to_string(),
            changes,
        })
    }

    /// Write every planned change that alters a file
    pub fn apply(&self, plan: &BumpPlan) -> Result<Vec<PathBuf>, BumpError> {
        let mut written = Vec::new();

        for change in plan.changes.iter().filter(|c| c.needs_write()) {
            let full_path = self.root.join(&change.path);
            fs::write(&full_path, &change.updated)
                .map_err(|e| BumpError::write_error(&change.path, e))?;
            tracing::info!(
                "wrote {} to {}",
                plan.new_version,
                change.path.display()
            );
            written.push(change.path.clone());
        }

        Ok(written)
    }

    /// Run the full workflow with the system shell for scripts
    pub fn run(&self, new_version: &str, options: BumpOptions) -> Result<BumpReport, BumpError> {
        self.run_with_runner(new_version, options, &SystemShell::new())
    }

    /// Run the full workflow with a custom script runner
    pub fn run_with_runner(
        &self,
        new_version: &str,
        options: BumpOptions,
        runner: &dyn ScriptRunner,
    ) -> Result<BumpReport, BumpError> {
        let current_version = self.current_version()?;
        tracing::info!("bumping {} -> {}", current_version, new_version);

        let plan = self.plan(new_version, options.strict)?;

        let (written, script) = if options.dry_run {
            (Vec::new(), None)
        } else {
            let written = self.apply(&plan)?;
            let script = match &self.config.scripts.postbump {
                Some(command) if options.run_script => Some(runner.run(command, &self.root)),
                _ => None,
            };
            (written, script)
        };

        Ok(BumpReport {
            current_version,
            plan,
            written,
            script,
            dry_run: options.dry_run,
        })
    }

    fn read(&self, path: &Path) -> Result<String, BumpError> {
        fs::read_to_string(self.root.join(path)).map_err(|e| BumpError::read_error(path, e))
    }
}
