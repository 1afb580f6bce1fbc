//! Filesystem boundary used to validate working copies

use std::io;
use std::path::{Path, PathBuf};

use nix::unistd::{AccessFlags, access};

#[cfg(test)]
use mockall::automock;

/// Filesystem queries needed by repositories.
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if the path can be written to.
    fn is_writable(&self, path: &Path) -> bool;

    /// Creates the directory and any missing parents; a no-op if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Resolves the path to an absolute one.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn absolute_path(&self, path: &Path) -> io::Result<PathBuf>;

    /// Returns `true` if `name` exists inside `dir`.
    fn child_exists(&self, dir: &Path, name: &str) -> bool {
        self.exists(&dir.join(name))
    }
}

/// Filesystem backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Asks the kernel whether this process may write to `path`
    fn is_writable(&self, path: &Path) -> bool {
        access(path, AccessFlags::W_OK).is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn absolute_path(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}
