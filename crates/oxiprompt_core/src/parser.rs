//! Textual import scanning.
//!
//! This is a lexical scan, not a JavaScript parser. Exactly two shapes are
//! recognised, with keywords matched case-insensitively:
//!
//! - `import <bindings> from '<path>'` where the bindings may be a default name,
//!   a `{ named, list }`, a `* as namespace`, or a combination separated by commas
//! - `require('<path>')` with a single string literal argument
//!
//! Single and double quotes are both accepted. Side-effect imports
//! (`import './x'`), dynamic `import()`, template literals and computed
//! arguments are not matched, and references inside comments or strings are
//! reported as if they were live code.

use log::trace;
use std::sync::LazyLock;

use regex::Regex;

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)import\s+(?:[\w*\s{},]+)\s+from\s+['"]([^'"]+)['"]|require\(['"]([^'"]+)['"]\)"#,
    )
    .expect("import pattern")
});

/// Returns the raw import strings found in `text`, in order of first
/// occurrence. Duplicates are kept.
pub fn extract_imports(text: &str) -> Vec<String> {
    let imports: Vec<String> = IMPORT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect();
    trace!("Extracted {} import strings", imports.len());
    imports
}
