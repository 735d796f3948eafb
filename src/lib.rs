//! verbump - release version propagation library
//!
//! This library propagates one canonical version into the project files
//! that store it, each in its own textual convention:
//! - pyproject.toml (`version = "X"`)
//! - Python modules (`__version__ = "X"`)
//! - Custom prefix/suffix or pattern conventions declared in `.versionrc.toml`

pub mod bump;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod registry;
pub mod script;
pub mod updater;
