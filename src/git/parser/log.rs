//! Log output parser (git log / git show)

use crate::git::constants::markers;
use crate::model::{ChangeEntry, CommitLog, CommitLogs};

use super::Parser;

impl Parser {
    /// Parse `git log` / `git show` output into commits keyed by revision
    ///
    /// Each line is classified once, in priority order:
    /// 1. `commit <rev>` starts a new commit (finalizing the previous one)
    /// 2. `Author: ` / `Date: ` set metadata
    /// 3. lines containing `create mode ` / `delete mode ` add a file entry
    /// 4. anything else is appended to the message
    ///
    /// A repeated revision replaces the earlier commit but keeps its position.
    pub fn parse_log<I, S>(lines: I) -> CommitLogs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut commits = CommitLogs::new();
        let mut current = CommitLog::default();

        for line in lines {
            let line = line.as_ref();

            if let Some(revision) = line.strip_prefix(markers::COMMIT) {
                // Text seen before the first boundary stays with the first commit
                if !current.revision.is_empty() {
                    finalize(&mut commits, std::mem::take(&mut current));
                }
                current.revision = revision.to_string();
                continue;
            }

            if let Some(author) = line.strip_prefix(markers::AUTHOR) {
                current.author = author.to_string();
                continue;
            }

            if let Some(date) = line.strip_prefix(markers::DATE) {
                current.date = date.to_string();
                continue;
            }

            if line.contains(markers::CREATE_MODE) || line.contains(markers::DELETE_MODE) {
                match Self::parse_change_line(line) {
                    Some(entry) => {
                        current.files.insert(entry.path.clone(), entry);
                    }
                    None => tracing::trace!(line, "skipping incomplete file change line"),
                }
                continue;
            }

            current.message.push_str(line);
            current.message.push('\n');
        }

        finalize(&mut commits, current);
        commits
    }

    /// Parse a `--summary` line such as ` create mode 100644 src/main.rs`
    ///
    /// Fields: action, the word `mode`, mode token, path (may contain spaces).
    pub(super) fn parse_change_line(line: &str) -> Option<ChangeEntry> {
        let mut fields = line.trim().splitn(4, ' ');
        let action = fields.next()?;
        let _mode_word = fields.next()?;
        let mode = fields.next()?;
        let path = fields.next()?;

        Some(ChangeEntry {
            path: path.to_string(),
            mode: parse_mode(mode),
            action: action.to_string(),
        })
    }

    /// Revision of the first line of `git log -n 1`, if it is a commit header
    pub fn parse_revision<S: AsRef<str>>(lines: &[S]) -> Option<String> {
        lines
            .first()
            .and_then(|line| line.as_ref().strip_prefix(markers::COMMIT))
            .map(str::to_string)
    }
}

fn finalize(commits: &mut CommitLogs, mut commit: CommitLog) {
    if commit.revision.is_empty() {
        return;
    }
    commit.message = commit.message.trim().to_string();
    commits.insert(commit.revision.clone(), commit);
}

/// Drop the two-character type prefix (`10`, `12`, `16`) and read the rest
/// as a decimal number; non-digits end the number.
fn parse_mode(token: &str) -> u32 {
    let digits: String = token
        .chars()
        .skip(2)
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}
