//! Error types shared by every repository backend

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a directory was rejected as a working copy
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingCopyIssue {
    #[error("does not exist and could not be created")]
    Uncreatable,

    #[error("is not a directory")]
    NotADirectory,

    #[error("is not writable")]
    NotWritable,
}

/// Errors that can occur when driving a version control binary
#[derive(Error, Debug)]
pub enum VcsError {
    /// The working copy could not be set; raised before any process runs
    #[error("Could not set the working directory: {} {issue}", path.display())]
    Configuration {
        path: PathBuf,
        issue: WorkingCopyIssue,
    },

    #[error("No working copy set")]
    NoWorkingCopy,

    #[error("No remote url set")]
    NoUrl,

    #[error("Could not execute command: {command} (exit code {exit_code}){}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        exit_code: i32,
        /// What the process wrote to standard error
        stderr: String,
    },

    #[error("Invalid command argument: {0}")]
    InvalidArgument(String),

    #[error("git binary not found: {0}")]
    GitNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl VcsError {
    /// Exit code of the failed process, if this error came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
