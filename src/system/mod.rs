//! Boundaries to the host system
//!
//! Process execution and filesystem queries are consumed through traits so the
//! git layer can be exercised without spawning processes or touching disk.

mod filesystem;
mod process;

pub use filesystem::{FileSystem, LiveFileSystem};
pub use process::{LiveProcessRunner, ProcessOutput, ProcessRunner};

#[cfg(test)]
pub use filesystem::MockFileSystem;
#[cfg(test)]
pub use process::MockProcessRunner;
