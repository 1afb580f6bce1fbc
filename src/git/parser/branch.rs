//! Branch listing parser (git branch -a)

use crate::git::constants::{DEFAULT_BRANCH, markers};
use crate::model::Branches;

use super::Parser;

impl Parser {
    /// Current branch from `git branch -a`
    ///
    /// The line starting with `*` names it; without one the default branch
    /// name is returned (e.g. in a repository without commits).
    pub fn parse_current_branch<S: AsRef<str>>(lines: &[S]) -> String {
        lines
            .iter()
            .find_map(|line| line.as_ref().strip_prefix(markers::CURRENT_BRANCH))
            .map(|rest| rest.strip_prefix(' ').unwrap_or(rest).to_string())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string())
    }

    /// Branches of `origin` from `git branch -a`
    ///
    /// Only `remotes/origin/...` lines count; the prefix is removed and
    /// symbolic refs (`HEAD -> origin/master`) are dropped.
    pub fn parse_branches<S: AsRef<str>>(lines: &[S]) -> Branches {
        let mut branches = Branches::new();

        for line in lines {
            let branch = line.as_ref().replace(markers::CURRENT_BRANCH, "");
            let branch = branch.trim();

            if !branch.contains(markers::REMOTE_BRANCH_PREFIX) {
                continue;
            }

            let branch = branch.replace(markers::REMOTE_BRANCH_PREFIX, "");
            if branch.contains(markers::SYMBOLIC_REF) {
                continue;
            }

            branches.insert(branch.clone(), branch);
        }

        branches
    }
}
