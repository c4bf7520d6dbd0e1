//! Core pieces of oxiprompt.
//!
//! This crate knows how to read a project's import statements and map them
//! back to files on disk:
//! - Scanning JS/TS text for `import ... from` and `require()` references
//! - Classifying references as relative, alias, or external
//! - Resolving local references with extension and index-file fallback
//! - Loading `directory_map.yml` and the prompt template

mod config;
mod constants;
mod error;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use config::{Config, default_template_path, find_config, load_config, load_template};
pub use constants::{
    CONFIG_FILE_NAMES, DEFAULT_ALIAS_PREFIX, DEFAULT_INCLUDE_EXTENSIONS, FILES_PLACEHOLDER,
    TEMPLATE_FILE_NAME,
};
pub use error::BundleError;
pub use parser::extract_imports;
pub use resolver::{classify, resolve};
pub use types::{Failure, ImportKind, ImportRef, Resolution, SourceFile};
