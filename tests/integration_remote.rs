//! Remote operation tests.
//!
//! A bare repository in a temporary directory stands in for the server, so
//! push, pull, fetch and clone run without network access.

#[macro_use]
#[path = "common/mod.rs"]
mod common;

use common::{RemoteRepo, TestRepo};
use vcs_git::{CheckoutOptions, GitRepository, Repository, UpdateOptions, VcsError};

fn open(dir: &TestRepo, url: &str) -> GitRepository {
    let mut repository = GitRepository::live();
    repository.set_url(url);
    repository
        .set_working_copy(&dir.path())
        .expect("working copy should be accepted");
    repository
}

/// Commit a file through the facade, publishing it to origin.
fn publish(repository: &GitRepository, dir: &TestRepo, name: &str, message: &str) {
    dir.write_file(name, message);
    repository.add(&[name]).unwrap();
    repository.commit(message).unwrap();
}

#[test]
fn test_commit_pushes_current_branch() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let local = TestRepo::with_remote(&remote);
    let repository = open(&local, &remote.url());

    publish(&repository, &local, "README.md", "Initial import");

    assert!(!repository.has_changes().unwrap());
    assert_eq!(remote.branches(), vec![local.current_branch()]);
}

#[test]
fn test_commit_without_changes_still_pushes() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let local = TestRepo::with_remote(&remote);
    local.write_file("a.txt", "a");
    local.commit_all("Committed outside");
    let repository = open(&local, &remote.url());

    repository.commit("nothing new").unwrap();

    assert_eq!(remote.branches(), vec![local.current_branch()]);
    assert_eq!(
        repository.commit_log("HEAD").unwrap().unwrap().message.lines().next(),
        Some("Committed outside")
    );
}

#[test]
fn test_fetch_all_lists_remote_branches() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let local = TestRepo::with_remote(&remote);
    let repository = open(&local, &remote.url());
    publish(&repository, &local, "a.txt", "First");
    let trunk = local.current_branch();

    repository.create_branch("dev").unwrap();
    publish(&repository, &local, "b.txt", "Second");

    repository
        .update(&UpdateOptions {
            all: true,
            ..Default::default()
        })
        .unwrap();

    let branches = repository.branches().unwrap();
    assert!(branches.contains_key("dev"));
    assert!(branches.contains_key(&trunk));
    assert!(!branches.contains_key("HEAD"));
    assert!(repository.has_branch("dev").unwrap());
}

#[test]
fn test_clone_then_pull() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let author = TestRepo::with_remote(&remote);
    let upstream = open(&author, &remote.url());
    publish(&upstream, &author, "a.txt", "First");
    let branch = upstream.branch().unwrap();

    let reader_dir = TestRepo::empty();
    let reader = open(&reader_dir, &remote.url());
    assert!(!reader.is_created());

    reader.checkout(&CheckoutOptions::default()).unwrap();

    assert!(reader.is_created());
    assert!(reader_dir.path().join("a.txt").exists());
    assert_eq!(reader.revision().unwrap(), upstream.revision().unwrap());

    publish(&upstream, &author, "b.txt", "Second");
    reader
        .update(&UpdateOptions {
            origin: Some("origin".to_string()),
            branch: Some(branch),
            ..Default::default()
        })
        .unwrap();

    assert!(reader_dir.path().join("b.txt").exists());
    assert_eq!(reader.revision().unwrap(), upstream.revision().unwrap());
}

#[test]
fn test_clone_without_checkout_leaves_no_files() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let author = TestRepo::with_remote(&remote);
    let upstream = open(&author, &remote.url());
    publish(&upstream, &author, "a.txt", "First");

    let reader_dir = TestRepo::empty();
    let reader = open(&reader_dir, &remote.url());
    reader
        .checkout(&CheckoutOptions {
            no_checkout: true,
            ..Default::default()
        })
        .unwrap();

    assert!(reader.is_created());
    assert!(!reader_dir.path().join("a.txt").exists());
}

#[test]
fn test_clone_of_missing_remote_fails() {
    skip_if_no_git!();
    let missing = TestRepo::empty();
    let url = missing.path().join("nowhere.git");
    let target = TestRepo::empty();
    let repository = open(&target, &url.to_string_lossy());

    let err = repository.checkout(&CheckoutOptions::default()).unwrap_err();

    assert!(matches!(err, VcsError::CommandFailed { .. }));
    assert!(!repository.is_created());
}
