//! git repository facade
//!
//! Builds the command for each repository operation, runs it through the
//! [`GitClient`] and parses the result.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::VcsError;
use crate::model::{Branches, CommitLog, CommitLogs, Tree};
use crate::repository::{
    CheckoutOptions, CommitQuery, Repository, UpdateOptions, validate_working_copy,
};
use crate::system::{FileSystem, LiveFileSystem};

use super::client::{ExecutionContext, GitClient};
use super::command::GitCommand;
use super::constants::{self, commands, flags};
use super::parser::Parser;

/// Port of a `scheme://[user@]host:port/...` url
///
/// scp-style urls (`git@host:path`) carry no port.
static URL_PORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://(?:[^@/]*@)?(?:\[[^\]/]*\]|[^:/\[\]]*):(\d+)(?:[/?#]|$)")
        .expect("Invalid url port regex")
});

/// A git repository driven through the git binary
pub struct GitRepository {
    client: GitClient,
    fs: Box<dyn FileSystem>,
    url: Option<String>,
    working_copy: Option<PathBuf>,
    private_key: Option<PathBuf>,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("client", &self.client)
            .field("url", &self.url)
            .field("working_copy", &self.working_copy)
            .field("private_key", &self.private_key)
            .finish_non_exhaustive()
    }
}

impl Default for GitRepository {
    fn default() -> Self {
        Self::new(GitClient::default(), LiveFileSystem)
    }
}

impl GitRepository {
    /// Create a repository with no url and no working copy
    pub fn new(client: GitClient, fs: impl FileSystem + 'static) -> Self {
        Self {
            client,
            fs: Box::new(fs),
            url: None,
            working_copy: None,
            private_key: None,
        }
    }

    /// Repository backed by the real git binary and filesystem
    pub fn live() -> Self {
        Self::default()
    }

    /// SSH port from the url, 22 when absent
    pub fn port(&self) -> u16 {
        self.url
            .as_deref()
            .and_then(|url| URL_PORT_REGEX.captures(url))
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(constants::DEFAULT_SSH_PORT)
    }

    pub fn private_key(&self) -> Option<&Path> {
        self.private_key.as_deref()
    }

    /// Key used for push, pull and fetch
    pub fn set_private_key(&mut self, key: Option<PathBuf>) {
        self.private_key = key;
    }

    pub fn client(&self) -> &GitClient {
        &self.client
    }

    /// Run an arbitrary git command in the working copy
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::NoWorkingCopy`] before a working copy is set, or
    /// any error of [`GitClient::execute`].
    pub fn git(&self, command: &GitCommand) -> Result<Vec<String>, VcsError> {
        let working_copy = self
            .working_copy
            .as_deref()
            .ok_or(VcsError::NoWorkingCopy)?;

        let context = ExecutionContext {
            working_copy,
            private_key: self.private_key.as_deref(),
            port: self.port(),
        };
        self.client.execute(&context, command)
    }

    /// `git status -s` lines
    pub fn status(&self) -> Result<Vec<String>, VcsError> {
        self.git(&GitCommand::new(commands::STATUS).flag(flags::SHORT))
    }

    /// Whether the working copy has uncommitted changes
    pub fn has_changes(&self) -> Result<bool, VcsError> {
        Ok(!self.status()?.is_empty())
    }

    /// Restore the working tree to `revision`
    pub fn checkout_revision(&self, revision: &str) -> Result<(), VcsError> {
        self.git(
            &GitCommand::new(commands::CHECKOUT)
                .arg(revision)
                .flag(flags::CURRENT_DIR),
        )?;
        Ok(())
    }

    /// Hard reset to `revision`
    pub fn reset(&self, revision: &str) -> Result<(), VcsError> {
        self.git(
            &GitCommand::new(commands::RESET)
                .flag(flags::HARD)
                .arg(revision),
        )?;
        Ok(())
    }

    /// List `branch` (optionally below `path`) with the last commit of
    /// every entry
    ///
    /// Directories come before files, each group in listing order.
    pub fn tree(&self, branch: &str, path: Option<&str>, recursive: bool) -> Result<Tree, VcsError> {
        let listing = self.git(
            &GitCommand::new(commands::LS_TREE)
                .flag(flags::LONG)
                .flag_if(recursive, flags::RECURSIVE)
                .arg(branch)
                .arg_opt(path.filter(|p| !p.is_empty())),
        )?;

        let mut directories = Tree::new();
        let mut files = Tree::new();

        for line in &listing {
            let Some(mut entry) = Parser::parse_tree_line(line) else {
                tracing::warn!(line, "skipping unparseable ls-tree row");
                continue;
            };

            let log = self.git(&last_commit_command(&entry.path))?;
            entry.commit = Parser::parse_log(&log).pop().map(|(_, commit)| commit);

            if entry.is_directory() {
                directories.insert(entry.path.clone(), entry);
            } else {
                files.insert(entry.path.clone(), entry);
            }
        }

        for (path, entry) in files {
            directories.entry(path).or_insert(entry);
        }
        Ok(directories)
    }
}

/// `git log --date=relative -n 1 <path>`
fn last_commit_command(path: &str) -> GitCommand {
    GitCommand::new(commands::LOG)
        .flag(flags::DATE_RELATIVE)
        .flag(flags::MAX_COUNT)
        .arg("1")
        .arg(path)
}

impl Repository for GitRepository {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn set_url(&mut self, url: &str) {
        self.url = Some(url.to_string());
    }

    fn working_copy(&self) -> Option<&Path> {
        self.working_copy.as_deref()
    }

    fn set_working_copy(&mut self, path: &Path) -> Result<(), VcsError> {
        let absolute = validate_working_copy(self.fs.as_ref(), path)?;
        tracing::debug!(working_copy = %absolute.display(), "working copy set");
        self.working_copy = Some(absolute);
        Ok(())
    }

    fn is_created(&self) -> bool {
        self.working_copy
            .as_deref()
            .is_some_and(|dir| self.fs.child_exists(dir, constants::METADATA_DIR))
    }

    fn create(&self) -> Result<(), VcsError> {
        let working_copy = self
            .working_copy
            .as_deref()
            .ok_or(VcsError::NoWorkingCopy)?;
        self.fs.create_dir_all(working_copy)?;

        self.git(&GitCommand::new(commands::INIT))?;

        if let Some(url) = self.url.as_deref() {
            self.git(
                &GitCommand::new(commands::REMOTE)
                    .flag(commands::REMOTE_ADD)
                    .arg(constants::ORIGIN)
                    .arg(url),
            )?;
        }
        Ok(())
    }

    fn checkout(&self, options: &CheckoutOptions) -> Result<(), VcsError> {
        let command = if options.is_clone() {
            let url = self.url.as_deref().ok_or(VcsError::NoUrl)?;
            let working_copy = self
                .working_copy
                .as_deref()
                .ok_or(VcsError::NoWorkingCopy)?;

            GitCommand::new(commands::CLONE)
                .flag_if(options.no_checkout, flags::NO_CHECKOUT)
                .arg(url)
                .arg(working_copy.to_string_lossy())
        } else {
            GitCommand::new(commands::CHECKOUT)
                .flag_if(options.orphan, flags::ORPHAN)
                .arg_opt(options.branch.as_deref())
        };

        self.git(&command)?;
        Ok(())
    }

    fn update(&self, options: &UpdateOptions) -> Result<(), VcsError> {
        let command = if options.all {
            GitCommand::new(commands::FETCH).flag(flags::ALL)
        } else {
            GitCommand::new(commands::PULL)
                .arg_opt(options.origin.as_deref().filter(|s| !s.is_empty()))
                .arg_opt(options.branch.as_deref().filter(|s| !s.is_empty()))
        };

        self.git(&command)?;
        Ok(())
    }

    fn branch(&self) -> Result<String, VcsError> {
        let output = self.git(&GitCommand::new(commands::BRANCH).flag(flags::ALL_BRANCHES))?;
        Ok(Parser::parse_current_branch(&output))
    }

    fn branches(&self) -> Result<Branches, VcsError> {
        let output = self.git(&GitCommand::new(commands::BRANCH).flag(flags::ALL_BRANCHES))?;
        Ok(Parser::parse_branches(&output))
    }

    fn create_branch(&self, name: &str) -> Result<(), VcsError> {
        self.git(
            &GitCommand::new(commands::CHECKOUT)
                .flag(flags::NEW_BRANCH)
                .arg(name),
        )?;
        Ok(())
    }

    fn revision(&self) -> Result<Option<String>, VcsError> {
        let output = self.git(
            &GitCommand::new(commands::LOG)
                .flag(flags::MAX_COUNT)
                .arg("1"),
        )?;
        Ok(Parser::parse_revision(&output))
    }

    fn commit_log(&self, revision: &str) -> Result<Option<CommitLog>, VcsError> {
        let output = self.git(
            &GitCommand::new(commands::SHOW)
                .flag(flags::DATE_RELATIVE)
                .arg(revision),
        )?;
        Ok(Parser::parse_log(&output).pop().map(|(_, commit)| commit))
    }

    fn commits(&self, query: &CommitQuery) -> Result<CommitLogs, VcsError> {
        let mut command = GitCommand::new(flags::NO_PAGER)
            .flag(commands::LOG)
            .flag(flags::DATE_RFC)
            .flag(flags::SUMMARY);

        if let Some(number) = query.number.filter(|n| *n > 0) {
            command = command.flag(flags::MAX_COUNT).arg(number.to_string());
        }

        command = command.arg_opt(query.range());

        if let Some(path) = query.path.as_deref().filter(|p| !p.is_empty()) {
            command = command.flag(flags::PATHS).arg(path);
        }

        let output = self.git(&command)?;
        Ok(Parser::parse_log(&output))
    }

    fn commit(&self, description: &str) -> Result<(), VcsError> {
        if self.has_changes()? {
            self.git(
                &GitCommand::new(commands::COMMIT)
                    .flag(flags::MESSAGE)
                    .arg(description),
            )?;
        }

        let branch = self.branch()?;
        self.git(
            &GitCommand::new(commands::PUSH)
                .arg(constants::ORIGIN)
                .arg(branch),
        )?;
        Ok(())
    }

    fn add(&self, files: &[&str]) -> Result<(), VcsError> {
        if files.is_empty() {
            self.git(&GitCommand::new(commands::ADD).flag(flags::CURRENT_DIR))?;
            return Ok(());
        }

        for file in files {
            self.git(&GitCommand::new(commands::ADD).arg(*file))?;
        }
        Ok(())
    }

    fn remove(&self, files: &[&str], recursive: bool) -> Result<(), VcsError> {
        let force = if recursive {
            flags::FORCE_RECURSIVE
        } else {
            flags::FORCE
        };

        for file in files {
            self.git(&GitCommand::new(commands::RM).flag(force).arg(*file))?;
        }
        Ok(())
    }
}
