//! vcs-git - structured access to git through its command line
//!
//! This library provides:
//! - [`git`]: git command construction, execution and output parsing
//! - [`model`]: Commits, file changes and tree entries
//! - [`repository`]: The repository capability set and its options
//! - [`system`]: Process and filesystem boundaries
//! - [`error`]: Error types

pub mod error;
pub mod git;
pub mod model;
pub mod repository;
pub mod system;

pub use error::{VcsError, WorkingCopyIssue};
pub use git::{GitClient, GitCommand, GitRepository};
pub use repository::{CheckoutOptions, CommitQuery, Repository, UpdateOptions};
