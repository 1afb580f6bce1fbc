//! Repository capability set
//!
//! Every version control backend exposes the same operations; [`GitRepository`]
//! is the one implementation shipped here.
//!
//! [`GitRepository`]: crate::git::GitRepository

use std::path::{Path, PathBuf};

use crate::error::{VcsError, WorkingCopyIssue};
use crate::model::{Branches, CommitLog, CommitLogs};
use crate::system::FileSystem;

/// Options for [`Repository::checkout`]
///
/// Without a branch (and without `orphan`) the remote is cloned into the
/// working copy; otherwise the branch is checked out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub branch: Option<String>,
    /// Start a branch with no parent history
    pub orphan: bool,
    /// Clone without materializing files
    pub no_checkout: bool,
}

impl CheckoutOptions {
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            branch: Some(name.into()),
            ..Self::default()
        }
    }

    /// Whether these options ask for a clone rather than a branch checkout
    pub fn is_clone(&self) -> bool {
        self.branch.is_none() && !self.orphan
    }
}

/// Options for [`Repository::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Fetch every remote instead of pulling
    pub all: bool,
    pub origin: Option<String>,
    pub branch: Option<String>,
}

/// Filters for [`Repository::commits`]; empty values are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitQuery {
    /// Only commits touching this path
    pub path: Option<String>,
    /// Maximum number of commits
    pub number: Option<usize>,
    /// Exclusive lower bound of the range
    pub since: Option<String>,
    /// Inclusive upper bound of the range
    pub until: Option<String>,
}

impl CommitQuery {
    /// Revision range argument (`since..until`, `since..`, `..until`)
    pub fn range(&self) -> Option<String> {
        let since = self.since.as_deref().filter(|s| !s.is_empty());
        let until = self.until.as_deref().filter(|s| !s.is_empty());

        match (since, until) {
            (Some(since), Some(until)) => Some(format!("{since}..{until}")),
            (Some(since), None) => Some(format!("{since}..")),
            (None, Some(until)) => Some(format!("..{until}")),
            (None, None) => None,
        }
    }
}

/// Operations shared by all repository backends
pub trait Repository {
    fn url(&self) -> Option<&str>;

    fn set_url(&mut self, url: &str);

    fn working_copy(&self) -> Option<&Path>;

    /// Set the local directory, creating it when missing
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::Configuration`] when the directory cannot be
    /// created, is not a directory, or is not writable.
    fn set_working_copy(&mut self, path: &Path) -> Result<(), VcsError>;

    /// Whether the working copy holds an initialized repository
    fn is_created(&self) -> bool;

    /// Initialize the repository in the working copy
    fn create(&self) -> Result<(), VcsError>;

    fn checkout(&self, options: &CheckoutOptions) -> Result<(), VcsError>;

    /// Merge remote changes into the working copy
    fn update(&self, options: &UpdateOptions) -> Result<(), VcsError>;

    /// Name of the current branch
    fn branch(&self) -> Result<String, VcsError>;

    fn branches(&self) -> Result<Branches, VcsError>;

    fn has_branch(&self, name: &str) -> Result<bool, VcsError> {
        Ok(self.branches()?.contains_key(name))
    }

    fn create_branch(&self, name: &str) -> Result<(), VcsError>;

    /// Revision of the latest commit, `None` when there is none
    fn revision(&self) -> Result<Option<String>, VcsError>;

    fn commit_log(&self, revision: &str) -> Result<Option<CommitLog>, VcsError>;

    fn commits(&self, query: &CommitQuery) -> Result<CommitLogs, VcsError>;

    /// Commit pending changes and publish the current branch
    fn commit(&self, description: &str) -> Result<(), VcsError>;

    /// Stage files; an empty slice stages everything
    fn add(&self, files: &[&str]) -> Result<(), VcsError>;

    fn remove(&self, files: &[&str], recursive: bool) -> Result<(), VcsError>;
}

/// Validate a working copy and resolve it to an absolute path
///
/// A missing directory is created first. No process is started.
pub fn validate_working_copy(fs: &dyn FileSystem, path: &Path) -> Result<PathBuf, VcsError> {
    let configuration = |issue: WorkingCopyIssue| VcsError::Configuration {
        path: path.to_path_buf(),
        issue,
    };

    if !fs.exists(path) {
        fs.create_dir_all(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "cannot create working copy");
            configuration(WorkingCopyIssue::Uncreatable)
        })?;
    }

    if !fs.is_dir(path) {
        return Err(configuration(WorkingCopyIssue::NotADirectory));
    }

    if !fs.is_writable(path) {
        return Err(configuration(WorkingCopyIssue::NotWritable));
    }

    Ok(fs.absolute_path(path)?)
}
