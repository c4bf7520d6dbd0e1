use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

use oxiprompt_core::{Config, Failure, SourceFile};

use crate::{
    graph::gather,
    render::{FileBundle, render},
    tree::project_tree,
};

#[derive(Debug, Clone, Default)]
pub struct BundleOptions {
    /// Prepend a listing of the source root
    pub include_tree: bool,
}

#[derive(Debug, Clone)]
pub struct BundleOutput {
    pub document: String,
    /// Visited files in discovery order
    pub files: Vec<SourceFile>,
    pub failures: Vec<Failure>,
}

/// Gathers everything `entry` depends on and renders it into `template`.
///
/// Fatal problems (missing or disallowed entry) return an error and nothing is
/// rendered. Recoverable ones are listed in [`BundleOutput::failures`].
pub fn run_bundle(
    entry: &Path,
    cfg: &Config,
    template: &str,
    opts: &BundleOptions,
) -> Result<BundleOutput> {
    info!("Bundling {}", entry.display());
    let traversal = gather(entry, cfg)?;
    debug!("Traversal found {} files", traversal.files.len());

    let tree = if opts.include_tree {
        match project_tree(&cfg.source_root, &cfg.project_root) {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!("Skipping project tree: {}", e);
                None
            }
        }
    } else {
        None
    };

    let bundle = FileBundle::collect(&traversal.files, &cfg.project_root);
    let document = render(template, &bundle, tree.as_deref());
    info!("Rendered {} files ({} bytes)", bundle.len(), document.len());

    Ok(BundleOutput { document, files: traversal.files, failures: traversal.failures })
}
