//! Fatal error kinds. Anything in here aborts a run before a bundle is emitted.
//!
//! Recoverable problems met during traversal are [`crate::Failure`] values instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("configuration not found: {0}")]
    ConfigurationMissing(String),

    #[error("invalid configuration in {path}: {reason}")]
    ConfigurationInvalid { path: PathBuf, reason: String },

    #[error("template not found: {0}")]
    TemplateMissing(PathBuf),

    #[error("entry file not found: {0}")]
    EntryFileMissing(PathBuf),

    #[error("entry file {path} does not match any of the included extensions {extensions:?}")]
    EntryExtensionNotIncluded { path: PathBuf, extensions: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
