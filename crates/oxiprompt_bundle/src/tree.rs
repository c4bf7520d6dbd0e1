use anyhow::{Result, anyhow};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::Path;

use crate::render::display_path;

/// Indented listing of everything under `dir`, honouring `.gitignore` and
/// skipping hidden entries. Entries are sorted by file name at each level.
///
/// The first line names `dir` relative to `root`; directories end with `/`.
pub fn project_tree(dir: &Path, root: &Path) -> Result<String> {
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", dir.display()));
    }
    debug!("Building project tree for {}", dir.display());

    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut out = String::new();
    for res in walker {
        let dent = res?;
        let depth = dent.depth();
        let is_dir = dent.file_type().is_some_and(|t| t.is_dir());

        let name = if depth == 0 {
            display_path(dent.path(), root)
        } else {
            dent.file_name().to_string_lossy().into_owned()
        };
        trace!("Tree entry at depth {}: {}", depth, name);

        out.push_str(&"  ".repeat(depth));
        out.push_str(&name);
        if is_dir {
            out.push('/');
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }

    #[test]
    fn test_tree_sorted_and_indented() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/utils/index.ts", "");
        create_test_file(root, "src/app.ts", "");
        create_test_file(root, "src/lib/helpers.ts", "");

        let tree = project_tree(&root.join("src"), root).unwrap();
        assert_eq!(
            tree,
            "src/\n  app.ts\n  lib/\n    helpers.ts\n  utils/\n    index.ts\n"
        );
    }

    #[test]
    fn test_tree_respects_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/.gitignore", "generated/\n");
        create_test_file(root, "src/generated/out.js", "");
        create_test_file(root, "src/app.ts", "");

        let tree = project_tree(&root.join("src"), root).unwrap();
        assert_eq!(tree, "src/\n  app.ts\n");
    }

    #[test]
    fn test_tree_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(project_tree(&temp_dir.path().join("nope"), temp_dir.path()).is_err());
    }
}
