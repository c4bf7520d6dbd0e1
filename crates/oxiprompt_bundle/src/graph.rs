use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use oxiprompt_core::{
    BundleError, Config, Failure, ImportRef, Resolution, SourceFile, classify, extract_imports,
    resolve,
};

/// Canonical paths already processed by one traversal, in discovery order.
///
/// Owned by a single [`gather`] call and never shared between calls.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<PathBuf>,
    order: Vec<PathBuf>,
}

impl VisitedSet {
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Returns `false` if the path was already present.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if !self.seen.insert(path.clone()) {
            return false;
        }
        self.order.push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn into_files(self) -> Vec<SourceFile> {
        self.order.into_iter().map(SourceFile::new).collect()
    }
}

/// Everything reachable from one entry file.
#[derive(Debug, Clone)]
pub struct Traversal {
    /// Visited files in the order they were first reached, entry first
    pub files: Vec<SourceFile>,
    pub failures: Vec<Failure>,
}

impl Traversal {
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }
}

struct Pending {
    path: PathBuf,
    from: PathBuf,
}

/// Collects the transitive closure of local imports starting at `entry`.
///
/// The entry must exist and carry an included extension; anything else about
/// the graph (unreadable files, imports that match nothing) is recorded in
/// [`Traversal::failures`] and the walk carries on.
pub fn gather(entry: &Path, cfg: &Config) -> Result<Traversal, BundleError> {
    info!("Gathering imports from {}", entry.display());

    if !entry.is_file() {
        return Err(BundleError::EntryFileMissing(entry.to_path_buf()));
    }
    if !cfg.includes(entry) {
        return Err(BundleError::EntryExtensionNotIncluded {
            path: entry.to_path_buf(),
            extensions: cfg.include_extensions.clone(),
        });
    }
    let entry = entry.canonicalize()?;

    let mut visited = VisitedSet::default();
    let failures = walk(&entry, cfg, &mut visited);

    info!("Reached {} files ({} failures)", visited.len(), failures.len());
    Ok(Traversal { files: visited.into_files(), failures })
}

/// Runs [`gather`] for each entry in parallel. Each entry gets its own visited set.
pub fn gather_many(entries: &[PathBuf], cfg: &Config) -> Vec<Result<Traversal, BundleError>> {
    debug!("Gathering {} entries in parallel", entries.len());
    entries.par_iter().map(|entry| gather(entry, cfg)).collect()
}

/// Depth-first walk over an explicit stack, so graph depth is not bounded by
/// the call stack. Children are pushed in reverse so the first import in a
/// file is explored first.
fn walk(entry: &Path, cfg: &Config, visited: &mut VisitedSet) -> Vec<Failure> {
    let mut failures = Vec::new();
    let mut stack = vec![Pending { path: entry.to_path_buf(), from: entry.to_path_buf() }];

    while let Some(Pending { path, from }) = stack.pop() {
        if visited.contains(&path) {
            trace!("Already visited: {}", path.display());
            continue;
        }
        if !cfg.includes(&path) || !path.is_file() {
            debug!("Dropping {}: missing or not an included file", path.display());
            failures.push(Failure::Missing { from, path });
            continue;
        }

        trace!("Visiting: {}", path.display());
        visited.insert(path.clone());

        let text = match SourceFile::new(path.clone()).read() {
            Ok(text) => text,
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                failures.push(Failure::Read { path, message: e.to_string() });
                continue;
            }
        };

        let mut children = Vec::new();
        for request in extract_imports(&text) {
            let kind = classify(&request, &cfg.alias_prefix);
            if !kind.is_local() {
                trace!("Skipping external import '{}'", request);
                continue;
            }

            let import = ImportRef { request, kind };
            match resolve(&path, &import, cfg) {
                Resolution::Resolved(next) => {
                    if !visited.contains(&next) {
                        children.push(Pending { path: next, from: path.clone() });
                    }
                }
                Resolution::Unresolved(candidate) => {
                    debug!("Unresolved import '{}' in {}", import.request, path.display());
                    failures.push(Failure::Unresolved {
                        from: path.clone(),
                        request: import.request,
                        candidate,
                    });
                }
            }
        }

        trace!("{} has {} local imports to follow", path.display(), children.len());
        stack.extend(children.into_iter().rev());
    }

    failures
}
