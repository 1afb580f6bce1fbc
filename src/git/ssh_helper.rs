//! Runtime lookup of the `GIT_SSH` helper script
//!
//! An installed copy next to the running binary wins. Without one, the
//! embedded script is written to a private temporary file once per process.

use std::fs::Permissions;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempPath;

use super::constants::{SSH_HELPER_NAME, SSH_HELPER_SCRIPT, SSH_HELPER_SHARE_DIR};

/// Embedded helper written to disk; lives until the process exits
static WRITTEN_HELPER: OnceLock<TempPath> = OnceLock::new();

/// Path of a usable helper script
///
/// # Errors
///
/// Returns an error if no installed helper exists and the embedded one cannot
/// be written.
pub(crate) fn default_helper() -> io::Result<PathBuf> {
    if let Some(installed) = installed_helper() {
        return Ok(installed);
    }
    written_helper()
}

fn installed_helper() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let found = candidates(exe.parent()?)
        .into_iter()
        .find(|candidate| candidate.is_file());
    if let Some(path) = &found {
        tracing::trace!(helper = %path.display(), "using installed ssh helper");
    }
    found
}

/// Where an installed helper may live, relative to the binary's directory
fn candidates(exe_dir: &Path) -> [PathBuf; 2] {
    [
        exe_dir.join(SSH_HELPER_NAME),
        exe_dir.join(SSH_HELPER_SHARE_DIR).join(SSH_HELPER_NAME),
    ]
}

fn written_helper() -> io::Result<PathBuf> {
    if let Some(path) = WRITTEN_HELPER.get() {
        return Ok(path.to_path_buf());
    }

    let mut file = tempfile::Builder::new()
        .prefix("vcs-git-ssh-")
        .suffix(".sh")
        .tempfile()?;
    file.write_all(SSH_HELPER_SCRIPT.as_bytes())?;
    file.as_file().set_permissions(Permissions::from_mode(0o700))?;
    let path = file.into_temp_path();
    tracing::debug!(helper = %path.display(), "wrote embedded ssh helper");

    // A concurrent writer may have won; its file is kept and ours is removed
    Ok(WRITTEN_HELPER.get_or_init(|| path).to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_candidates_next_to_binary_and_in_share() {
        let [beside, shared] = candidates(Path::new("/opt/vcs-git/bin"));
        assert_eq!(beside, PathBuf::from("/opt/vcs-git/bin/git-ssh.sh"));
        assert_eq!(
            shared,
            PathBuf::from("/opt/vcs-git/bin/../share/vcs-git/git-ssh.sh")
        );
    }

    #[test]
    fn test_candidates_resolve_when_installed() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        let share = tmp.path().join("share/vcs-git");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(&share).unwrap();
        std::fs::write(share.join(SSH_HELPER_NAME), SSH_HELPER_SCRIPT).unwrap();

        let found = candidates(&bin).into_iter().find(|c| c.is_file());
        assert_eq!(
            found.map(|p| std::fs::canonicalize(p).unwrap()),
            Some(std::fs::canonicalize(share.join(SSH_HELPER_NAME)).unwrap())
        );
    }

    #[test]
    fn test_default_helper_exists_and_is_executable() {
        let helper = default_helper().unwrap();
        let meta = std::fs::metadata(&helper).unwrap();

        assert!(meta.is_file());
        assert_ne!(meta.permissions().mode() & 0o100, 0);
        assert_eq!(std::fs::read_to_string(&helper).unwrap(), SSH_HELPER_SCRIPT);
    }

    #[test]
    fn test_written_helper_is_reused() {
        assert_eq!(written_helper().unwrap(), written_helper().unwrap());
    }
}
