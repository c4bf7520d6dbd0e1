use log::{debug, trace};
use path_clean::PathClean;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    constants::INDEX_STEM,
    types::{ImportKind, ImportRef, Resolution},
};

/// Tags a raw import string. Only `./`, `../` and the alias prefix are local;
/// everything else is treated as a package and never resolved.
pub fn classify(request: &str, alias_prefix: &str) -> ImportKind {
    if request.starts_with("./") || request.starts_with("../") {
        ImportKind::Relative
    } else if !alias_prefix.is_empty() && request.starts_with(alias_prefix) {
        ImportKind::Alias
    } else {
        ImportKind::External
    }
}

/// Resolves a local import made from `from_file` to a file on disk.
///
/// Probing order, first hit wins:
/// 1. the candidate itself, if it already carries an included extension
/// 2. `index<ext>` inside the candidate, if the candidate is a directory
/// 3. `<candidate><ext>` for each included extension, if it is not
///
/// Extensions are tried in configuration order. When nothing matches, the
/// extension-less candidate is handed back as [`Resolution::Unresolved`].
/// External imports are never probed and come back unresolved as written.
pub fn resolve(from_file: &Path, import: &ImportRef, cfg: &Config) -> Resolution {
    trace!("Resolving: '{}' from {}", import.request, from_file.display());

    let candidate = match import.kind {
        ImportKind::Relative => {
            let base = from_file.parent().unwrap_or(&cfg.project_root);
            base.join(&import.request).clean()
        }
        ImportKind::Alias => {
            let remainder = import.request.strip_prefix(cfg.alias_prefix.as_str()).unwrap_or("");
            trace!("Resolving alias '{}' under {}", remainder, cfg.source_root.display());
            cfg.source_root.join(remainder).clean()
        }
        ImportKind::External => {
            debug!("Refusing to resolve external import '{}'", import.request);
            return Resolution::Unresolved(PathBuf::from(&import.request));
        }
    };

    match probe(&candidate, cfg) {
        Some(found) => {
            trace!("Resolved '{}' to {}", import.request, found.display());
            Resolution::Resolved(found.canonicalize().unwrap_or(found))
        }
        None => {
            debug!("Failed to resolve '{}' from {}", import.request, from_file.display());
            Resolution::Unresolved(candidate)
        }
    }
}

fn probe(candidate: &Path, cfg: &Config) -> Option<PathBuf> {
    if cfg.includes(candidate) && candidate.is_file() {
        return Some(candidate.to_path_buf());
    }

    if candidate.is_dir() {
        let index = cfg
            .include_extensions
            .iter()
            .map(|ext| candidate.join(format!("{}{}", INDEX_STEM, ext)))
            .find(|p| p.is_file());
        if index.is_none() {
            trace!("Directory {} has no index file", candidate.display());
        }
        return index;
    }

    cfg.include_extensions.iter().map(|ext| with_suffix(candidate, ext)).find(|p| p.is_file())
}

/// Appends `suffix` to the final component without treating it as an extension swap,
/// so `./button.styles` probes `button.styles.ts` rather than `button.ts`.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
