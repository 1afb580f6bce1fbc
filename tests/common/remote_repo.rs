//! Bare repository standing in for a git server.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use super::TestRepo;

/// A bare repository reachable through its filesystem path.
pub struct RemoteRepo {
    dir: TempDir,
}

impl RemoteRepo {
    pub fn new_bare() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        run_git(dir.path(), &["init", "--bare", "--quiet"]);
        Self { dir }
    }

    /// Path usable as a clone or push url.
    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Branch names published to this remote.
    pub fn branches(&self) -> Vec<String> {
        run_git(
            self.dir.path(),
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
        )
        .lines()
        .map(str::to_string)
        .collect()
    }
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {args:?} failed in bare remote: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

impl TestRepo {
    /// A fresh repository whose `origin` points at `remote`.
    pub fn with_remote(remote: &RemoteRepo) -> Self {
        let repo = Self::new();
        repo.add_remote("origin", &remote.url());
        repo
    }
}
