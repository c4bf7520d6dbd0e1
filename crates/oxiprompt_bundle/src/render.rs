use log::{debug, trace, warn};
use std::path::{Component, Path, PathBuf};

use oxiprompt_core::{FILES_PLACEHOLDER, SourceFile};

/// Body used for a file that cannot be read at render time
pub const UNREADABLE_PLACEHOLDER: &str = "ERROR: Could not read file content.";

/// One rendered file: heading path, fence language and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub display_path: String,
    pub language: String,
    pub content: String,
}

/// Files ready for rendering, sorted by canonical path.
#[derive(Debug, Clone, Default)]
pub struct FileBundle {
    fragments: Vec<Fragment>,
}

impl FileBundle {
    /// Sorts `files` by their path string (byte order, locale-independent) and
    /// reads each one. Read errors become [`UNREADABLE_PLACEHOLDER`].
    pub fn collect(files: &[SourceFile], root: &Path) -> Self {
        let mut sorted: Vec<(String, &SourceFile)> =
            files.iter().map(|f| (f.path.to_string_lossy().into_owned(), f)).collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted.dedup_by(|a, b| a.0 == b.0);

        let fragments = sorted
            .into_iter()
            .map(|(_, file)| {
                let content = file.read().unwrap_or_else(|e| {
                    warn!("Could not read {} for rendering: {}", file.path.display(), e);
                    UNREADABLE_PLACEHOLDER.to_string()
                });
                Fragment {
                    display_path: display_path(&file.path, root),
                    language: language_for(file.extension()).to_string(),
                    content,
                }
            })
            .collect();

        Self { fragments }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Builds the final document.
///
/// Per-file sections replace the first `{{files}}` marker in the template. A
/// template without the marker is treated as a prologue and the sections are
/// appended after a blank line. `tree`, when given, is rendered as a fenced
/// listing ahead of the file sections.
pub fn render(template: &str, bundle: &FileBundle, tree: Option<&str>) -> String {
    debug!("Rendering {} files", bundle.len());
    let mut sections = String::new();

    if let Some(tree) = tree {
        sections.push_str("### Project structure\n");
        push_fenced(&mut sections, "", tree);
    }

    for fragment in bundle.fragments() {
        trace!("Rendering section for {}", fragment.display_path);
        sections.push_str(&format!("### File: {}\n", fragment.display_path));
        push_fenced(&mut sections, &fragment.language, &fragment.content);
    }

    if template.contains(FILES_PLACEHOLDER) {
        template.replacen(FILES_PLACEHOLDER, &sections, 1)
    } else {
        format!("{}\n\n{}", template, sections)
    }
}

fn push_fenced(out: &mut String, language: &str, content: &str) {
    let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
    out.push_str(&fence);
    out.push_str(language);
    out.push('\n');
    out.push_str(content);
    if !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out.push_str("\n\n");
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Fence language for a file extension
pub fn language_for(ext: Option<&str>) -> &str {
    match ext {
        Some("ts" | "mts" | "cts") => "typescript",
        Some("tsx") => "tsx",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("jsx") => "jsx",
        Some(other) => other,
        None => "",
    }
}

/// Heading path for `path`: relative to `root` when possible, with `/` separators.
pub fn display_path(path: &Path, root: &Path) -> String {
    let rel = match path.strip_prefix(root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => make_relative(path, root).unwrap_or_else(|| path.to_path_buf()),
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path from `base` to `target` using `..` steps, or `None` when the two share
/// no leading component (another drive, or one relative and one absolute).
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    let shared = target.iter().zip(&base).take_while(|(t, b)| t == b).count();
    if shared == 0 {
        return None;
    }

    let mut rel: PathBuf = base[shared..].iter().map(|_| Component::ParentDir).collect();
    rel.extend(
        target[shared..]
            .iter()
            .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir)),
    );

    if rel.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(rel) }
}
