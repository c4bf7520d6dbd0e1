use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// How an import request is treated, decided purely from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Starts with `./` or `../`
    Relative,
    /// Starts with the configured alias prefix (`@/` by default)
    Alias,
    /// Bare specifier such as a package name; never resolved
    External,
}

impl ImportKind {
    pub fn is_local(self) -> bool {
        !matches!(self, ImportKind::External)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    pub request: String,
    pub kind: ImportKind,
}

/// Outcome of resolving a local import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(PathBuf),
    /// Nothing on disk matched; carries the extension-less candidate that was tried
    Unresolved(PathBuf),
}

impl Resolution {
    pub fn path(&self) -> &Path {
        match self {
            Resolution::Resolved(p) | Resolution::Unresolved(p) => p,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// A file reached during traversal, identified by its canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// Reads the file text. Content is never cached on the value itself.
    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// Non-fatal problem recorded while walking the import graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The file was visited but its text could not be read; it is kept as a leaf
    Read { path: PathBuf, message: String },
    /// A local import matched nothing on disk
    Unresolved { from: PathBuf, request: String, candidate: PathBuf },
    /// A resolved path is gone, or its real file lacks an included extension
    Missing { from: PathBuf, path: PathBuf },
}

impl Failure {
    /// The path this failure is about
    pub fn path(&self) -> &Path {
        match self {
            Failure::Read { path, .. } | Failure::Missing { path, .. } => path,
            Failure::Unresolved { candidate, .. } => candidate,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Read { path, message } => {
                write!(f, "could not read {}: {}", path.display(), message)
            }
            Failure::Unresolved { from, request, candidate } => write!(
                f,
                "unresolved import '{}' in {} (tried {})",
                request,
                from.display(),
                candidate.display()
            ),
            Failure::Missing { from, path } => {
                write!(
                    f,
                    "{} (imported from {}) is missing or not an included file",
                    path.display(),
                    from.display()
                )
            }
        }
    }
}
