//! Tree listing parser (git ls-tree -l)

use crate::git::constants::markers;
use crate::model::TreeEntry;

use super::Parser;

impl Parser {
    /// Parse one `git ls-tree -l` row
    ///
    /// Format: `<mode> SP <type> SP <object> SP+ <size> TAB <path>`
    ///
    /// Returns `None` for rows that do not have all five columns. The size
    /// column is right-aligned by git; its padding is removed.
    pub fn parse_tree_line(line: &str) -> Option<TreeEntry> {
        let (attributes, path) = line.split_once(markers::TREE_PATH_SEPARATOR)?;
        let mut fields = attributes.splitn(4, ' ');

        let mode = fields.next()?;
        let kind = fields.next()?;
        let revision = fields.next()?;
        let size = fields.next()?.trim();

        Some(TreeEntry {
            path: path.to_string(),
            mode: mode.to_string(),
            kind: kind.to_string(),
            revision: revision.to_string(),
            size: size.to_string(),
            commit: None,
        })
    }
}
