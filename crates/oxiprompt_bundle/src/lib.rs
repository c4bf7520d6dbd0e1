//! Import-graph bundling for JavaScript/TypeScript projects.
//!
//! Starting from a single entry file, this crate follows local imports to
//! collect every file the entry depends on and renders them into one
//! document, typically used as context for a language model prompt.
//!
//! # Examples
//!
//! ```no_run
//! use oxiprompt_bundle::{BundleOptions, run_bundle};
//! use oxiprompt_core::{load_config, load_template, default_template_path};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = load_config(Path::new("directory_map.yml"))?;
//! let template = load_template(&default_template_path(&cfg))?;
//!
//! let out = run_bundle(Path::new("src/app.ts"), &cfg, &template, &BundleOptions::default())?;
//! print!("{}", out.document);
//! # Ok(())
//! # }
//! ```

mod bundler;
mod graph;
mod render;
mod reporter;
mod tree;

// Re-export public API
pub use bundler::{BundleOptions, BundleOutput, run_bundle};
pub use graph::{Traversal, VisitedSet, gather, gather_many};
pub use render::{FileBundle, Fragment, UNREADABLE_PLACEHOLDER, display_path, language_for, render};
pub use reporter::{print_failures, print_summary};
pub use tree::project_tree;
