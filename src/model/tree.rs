//! Tree listing data model

use indexmap::IndexMap;

use super::CommitLog;
use super::commit::friendly_revision;

/// Object type git reports for directories
pub const DIRECTORY_KIND: &str = "tree";

/// Tree entries keyed by path, directories first
pub type Tree = IndexMap<String, TreeEntry>;

/// One row of `git ls-tree -l`, annotated with the last commit touching it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,

    /// Raw mode string (e.g. `100644`, `040000`)
    pub mode: String,

    /// Raw object type (`blob`, `tree`, `commit`)
    pub kind: String,

    /// Object hash of the entry's content
    pub revision: String,

    /// Raw size column (`-` for directories)
    pub size: String,

    /// Most recent commit touching this path
    pub commit: Option<CommitLog>,
}

impl TreeEntry {
    /// Last path component
    pub fn name(&self) -> &str {
        match self.path.rfind('/') {
            Some(pos) => &self.path[pos + 1..],
            None => &self.path,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == DIRECTORY_KIND
    }

    /// Short object hash for display
    pub fn friendly_revision(&self) -> &str {
        friendly_revision(&self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> TreeEntry {
        TreeEntry {
            path: "src/model/tree.rs".to_string(),
            mode: "100644".to_string(),
            kind: "blob".to_string(),
            revision: "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391".to_string(),
            size: "0".to_string(),
            commit: None,
        }
    }

    #[test]
    fn test_name_nested() {
        assert_eq!(sample_entry().name(), "tree.rs");
    }

    #[test]
    fn test_name_top_level() {
        let entry = TreeEntry {
            path: "README.md".to_string(),
            ..sample_entry()
        };
        assert_eq!(entry.name(), "README.md");
    }

    #[test]
    fn test_is_directory() {
        assert!(!sample_entry().is_directory());

        let dir = TreeEntry {
            kind: "tree".to_string(),
            ..sample_entry()
        };
        assert!(dir.is_directory());
    }

    #[test]
    fn test_friendly_revision() {
        assert_eq!(sample_entry().friendly_revision(), "e69de29");
    }
}
