//! Data models
//!
//! Structured values built from git's textual output: commits with their
//! file changes, and annotated tree listings.

mod commit;
mod tree;

pub use commit::{ChangeEntry, CommitLog, CommitLogs, FRIENDLY_REVISION_LEN};
pub use tree::{DIRECTORY_KIND, Tree, TreeEntry};

use indexmap::IndexMap;

/// Branch names keyed by themselves, in listing order
pub type Branches = IndexMap<String, String>;
