//! Application error types using thiserror
//!
//! Error hierarchy:
//! - UpdaterError: Version marker lookups in file content
//! - ConfigError: Issues with the release configuration
//! - BumpError: File-level failures while reading or rewriting versions

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bump workflow related errors
    #[error(transparent)]
    Bump(#[from] BumpError),
}

/// Errors raised by an updater while reading file content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    /// No line in the content matches the convention
    #[error("no line matching the '{convention}' version convention")]
    VersionNotFound { convention: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A binding refers to an updater that is not defined
    #[error("unknown updater '{name}' for {file}")]
    UnknownUpdater { name: String, file: PathBuf },

    /// The same file is bound more than once
    #[error("file {file} is listed more than once")]
    DuplicateFile { file: PathBuf },

    /// A custom updater reuses a built-in name
    #[error("updater name '{name}' is reserved for a built-in convention")]
    ReservedUpdaterName { name: String },

    /// A custom updater definition is malformed
    #[error("invalid updater '{name}': {message}")]
    InvalidUpdater { name: String, message: String },

    /// No package file to read the current version from
    #[error("at least one package file is required")]
    NoPackageFiles,
}

/// Errors related to the bump workflow
#[derive(Error, Debug)]
pub enum BumpError {
    /// Bindings that cannot serve the workflow
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to read a bound file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a bound file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A package file has no version marker
    #[error("cannot read version from {path}: {source}")]
    VersionNotFound {
        path: PathBuf,
        #[source]
        source: UpdaterError,
    },

    /// A bump file has no version marker and strict mode is on
    #[error("no version marker in {path} ('{convention}' convention)")]
    MarkerMissing { path: PathBuf, convention: String },

    /// The new version cannot be written as part of a single line
    #[error("version {version:?} must not contain line breaks")]
    InvalidVersion { version: String },

    /// The post-bump script could not be started or exited non-zero
    #[error("post-bump script '{command}' failed: {message}")]
    ScriptFailed { command: String, message: String },
}

impl UpdaterError {
    /// Creates a new VersionNotFound error
    pub fn version_not_found(convention: impl Into<String>) -> Self {
        UpdaterError::VersionNotFound {
            convention: convention.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnknownUpdater error
    pub fn unknown_updater(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        ConfigError::UnknownUpdater {
            name: name.into(),
            file: file.into(),
        }
    }

    /// Creates a new InvalidUpdater error
    pub fn invalid_updater(name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidUpdater {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl BumpError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BumpError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BumpError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        BumpError::InvalidVersion {
            version: version.into(),
        }
    }

    /// Creates a new ScriptFailed error
    pub fn script_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        BumpError::ScriptFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}
