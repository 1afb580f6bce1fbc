//! Commit data model

use indexmap::IndexMap;

/// Length of a revision in its short display form
pub const FRIENDLY_REVISION_LEN: usize = 7;

/// Commits keyed by revision, in the order they were finalized
pub type CommitLogs = IndexMap<String, CommitLog>;

/// A file created or deleted by a commit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeEntry {
    /// Path relative to the repository root
    pub path: String,

    /// Permission and type bits, e.g. `644` for `100644`
    pub mode: u32,

    /// Verb that introduced the entry (`create` or `delete`)
    pub action: String,
}

/// One commit as reported by `git log` / `git show`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitLog {
    /// Full revision hash
    pub revision: String,

    /// Author as printed by git (`Name <email>`)
    pub author: String,

    /// Date in whatever format the command was asked for
    pub date: String,

    /// Commit message without surrounding whitespace
    pub message: String,

    /// Created and deleted files, keyed by path
    pub files: IndexMap<String, ChangeEntry>,
}

impl CommitLog {
    /// Short revision for display
    pub fn friendly_revision(&self) -> &str {
        friendly_revision(&self.revision)
    }
}

/// First seven characters of a revision (the whole string when shorter)
pub(crate) fn friendly_revision(revision: &str) -> &str {
    match revision.char_indices().nth(FRIENDLY_REVISION_LEN) {
        Some((end, _)) => &revision[..end],
        None => revision,
    }
}
