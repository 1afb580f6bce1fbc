//! git-specific constants
//!
//! Centralized definitions for git command names, flags, output markers and
//! the environment used for remote transport.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// Branch reported when `git branch -a` has no current-branch marker
pub const DEFAULT_BRANCH: &str = "master";

/// Remote registered by `create`
pub const ORIGIN: &str = "origin";

/// Port used when the url does not name one
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Metadata directory whose presence marks an initialized working copy
pub const METADATA_DIR: &str = ".git";

/// File name of the `GIT_SSH` helper installed next to the binary
pub const SSH_HELPER_NAME: &str = "git-ssh.sh";

/// Install location of the helper relative to the binary's directory
pub const SSH_HELPER_SHARE_DIR: &str = "../share/vcs-git";

/// Helper contents, written out when no installed copy is found
pub const SSH_HELPER_SCRIPT: &str = include_str!("../../scripts/git-ssh.sh");

/// Exit code `sh` reports when the program to run does not exist
pub const COMMAND_NOT_FOUND_EXIT_CODE: i32 = 127;

/// git subcommands
pub mod commands {
    pub const INIT: &str = "init";
    pub const REMOTE: &str = "remote";
    pub const REMOTE_ADD: &str = "add";
    pub const CLONE: &str = "clone";
    pub const CHECKOUT: &str = "checkout";
    pub const FETCH: &str = "fetch";
    pub const PULL: &str = "pull";
    pub const PUSH: &str = "push";
    pub const STATUS: &str = "status";
    pub const BRANCH: &str = "branch";
    pub const RESET: &str = "reset";
    pub const LOG: &str = "log";
    pub const SHOW: &str = "show";
    pub const COMMIT: &str = "commit";
    pub const ADD: &str = "add";
    pub const RM: &str = "rm";
    pub const LS_TREE: &str = "ls-tree";
}

/// git command flags
pub mod flags {
    /// Global flag: write straight to stdout instead of a pager
    pub const NO_PAGER: &str = "--no-pager";
    pub const NO_CHECKOUT: &str = "-n";
    pub const ORPHAN: &str = "--orphan";
    pub const NEW_BRANCH: &str = "-b";
    pub const ALL: &str = "--all";
    pub const SHORT: &str = "-s";
    pub const ALL_BRANCHES: &str = "-a";
    pub const HARD: &str = "--hard";
    pub const MAX_COUNT: &str = "-n";
    pub const DATE_RELATIVE: &str = "--date=relative";
    pub const DATE_RFC: &str = "--date=rfc";
    pub const SUMMARY: &str = "--summary";
    pub const MESSAGE: &str = "-m";
    pub const FORCE: &str = "-f";
    pub const FORCE_RECURSIVE: &str = "-fr";
    pub const LONG: &str = "-l";
    pub const RECURSIVE: &str = "-r";
    /// Separates revisions from paths
    pub const PATHS: &str = "--";
    /// `git checkout <rev> .` restores the whole tree
    pub const CURRENT_DIR: &str = ".";
}

/// Markers recognised in command output
pub mod markers {
    /// Start of a commit block in `git log` / `git show`
    pub const COMMIT: &str = "commit ";
    pub const AUTHOR: &str = "Author: ";
    pub const DATE: &str = "Date: ";
    /// `--summary` line for an added file
    pub const CREATE_MODE: &str = "create mode ";
    /// `--summary` line for a removed file
    pub const DELETE_MODE: &str = "delete mode ";
    /// Current branch in `git branch -a`
    pub const CURRENT_BRANCH: char = '*';
    /// Remote-tracking branch prefix in `git branch -a`
    pub const REMOTE_BRANCH_PREFIX: &str = "remotes/origin/";
    /// Symbolic ref arrow (`remotes/origin/HEAD -> origin/master`)
    pub const SYMBOLIC_REF: &str = "->";
    /// Separates attributes from the path in `git ls-tree`
    pub const TREE_PATH_SEPARATOR: char = '\t';
}

/// Environment exported ahead of remote transport commands
pub mod env {
    /// Disables interactive editor prompts (e.g. merge messages on pull)
    pub const EDITOR_DISABLED: &str = "export GIT_EDITOR=:";
    pub const SSH: &str = "GIT_SSH";
    pub const SSH_KEY: &str = "GIT_SSH_KEY";
    pub const SSH_PORT: &str = "GIT_SSH_PORT";
}

/// Command prefixes that talk to a remote (`push`, `pull`, `fetch`)
pub const REMOTE_TRANSPORT_PREFIXES: [&str; 2] = ["pu", "fetch"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_command_name() {
        assert_eq!(GIT_COMMAND, "git");
    }

    #[test]
    fn test_ssh_helper_script_is_embedded() {
        assert!(SSH_HELPER_SCRIPT.starts_with("#!/bin/sh"));
        assert!(SSH_HELPER_SCRIPT.contains(env::SSH_KEY));
        assert!(SSH_HELPER_SCRIPT.contains(env::SSH_PORT));
    }

    #[test]
    fn test_ssh_helper_keeps_host_key_checking() {
        assert!(!SSH_HELPER_SCRIPT.contains("StrictHostKeyChecking"));
    }

    #[test]
    fn test_boundary_markers_end_with_space() {
        // "commit" alone must not match message lines like "commitment"
        assert!(markers::COMMIT.ends_with(' '));
        assert!(markers::AUTHOR.ends_with(' '));
        assert!(markers::DATE.ends_with(' '));
    }
}
