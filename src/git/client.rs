//! git command executor
//!
//! Runs a [`GitCommand`] inside a repository's working copy. Local commands
//! run directly; push, pull and fetch run as a small shell script so the SSH
//! transport environment can be exported first.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::VcsError;
use crate::system::{LiveProcessRunner, ProcessRunner};

use super::command::GitCommand;
use super::constants::{self, env};
use super::ssh_helper;

/// Serialises working-directory changes across threads.
///
/// Outside this lock the process always sits in its starting directory.
pub(crate) static WORKING_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Repository state an invocation depends on
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Absolute path of the working copy; commands run from here
    pub working_copy: &'a Path,
    /// Private key for SSH transport
    pub private_key: Option<&'a Path>,
    /// SSH port of the remote
    pub port: u16,
}

/// Executor for git commands
pub struct GitClient {
    runner: Box<dyn ProcessRunner>,
    binary: String,
    /// Explicit helper; resolved at run time when unset
    ssh_helper: Option<PathBuf>,
}

impl std::fmt::Debug for GitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitClient")
            .field("binary", &self.binary)
            .field("ssh_helper", &self.ssh_helper)
            .finish_non_exhaustive()
    }
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new(LiveProcessRunner)
    }
}

impl GitClient {
    /// Create a client running commands through `runner`
    pub fn new(runner: impl ProcessRunner + 'static) -> Self {
        Self {
            runner: Box::new(runner),
            binary: constants::GIT_COMMAND.to_string(),
            ssh_helper: None,
        }
    }

    /// Use a different git binary (name on PATH or absolute path)
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Use a specific `GIT_SSH` helper script instead of the bundled one
    pub fn with_ssh_helper(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_helper = Some(path.into());
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Explicitly configured helper, if any
    pub fn ssh_helper(&self) -> Option<&Path> {
        self.ssh_helper.as_deref()
    }

    /// Run `command` from the working copy and return its output lines
    ///
    /// The previous working directory is restored on every exit path.
    ///
    /// # Errors
    ///
    /// - [`VcsError::CommandFailed`] when git exits with a nonzero code
    /// - [`VcsError::GitNotFound`] when the configured binary does not exist
    /// - [`VcsError::Io`] when the directory change or spawn fails
    pub fn execute(
        &self,
        context: &ExecutionContext<'_>,
        command: &GitCommand,
    ) -> Result<Vec<String>, VcsError> {
        let shell_command = format!("{} {}", quote(&self.binary)?, command.to_command_line()?);

        let _lock = WORKING_DIR_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let previous = std::env::current_dir()?;
        std::env::set_current_dir(context.working_copy)?;
        let _restore = scopeguard::guard(previous, |previous| {
            if let Err(e) = std::env::set_current_dir(&previous) {
                tracing::warn!(
                    directory = %previous.display(),
                    error = %e,
                    "failed to restore working directory"
                );
            }
        });

        let remote = command.is_remote_transport();
        tracing::debug!(
            command = %shell_command,
            working_copy = %context.working_copy.display(),
            remote,
            "executing git"
        );

        let result = if remote {
            let script = self.transport_script(context, &shell_command)?;
            self.runner.run_script(&script)
        } else {
            self.runner.run(&shell_command)
        };

        let output = result.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                VcsError::GitNotFound(self.binary.clone())
            } else {
                VcsError::Io(e)
            }
        })?;

        tracing::debug!(
            exit_code = output.exit_code,
            lines = output.lines.len(),
            "git finished"
        );

        if output.exit_code == constants::COMMAND_NOT_FOUND_EXIT_CODE {
            tracing::debug!(stderr = %output.stderr, "shell could not run git");
            return Err(VcsError::GitNotFound(self.binary.clone()));
        }

        if !output.success() {
            return Err(VcsError::CommandFailed {
                command: shell_command,
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(output.lines)
    }

    /// Statements run for push, pull and fetch
    ///
    /// The SSH exports must precede the git line so git inherits them.
    fn transport_script(
        &self,
        context: &ExecutionContext<'_>,
        shell_command: &str,
    ) -> Result<Vec<String>, VcsError> {
        let mut script = Vec::with_capacity(5);

        if let Some(key) = context.private_key {
            let helper = match &self.ssh_helper {
                Some(helper) => helper.clone(),
                None => ssh_helper::default_helper()?,
            };
            script.push(format!(
                "export {}={}",
                env::SSH,
                quote(&helper.to_string_lossy())?
            ));
            script.push(format!(
                "export {}={}",
                env::SSH_KEY,
                quote(&key.to_string_lossy())?
            ));
            script.push(format!("export {}={}", env::SSH_PORT, context.port));
        }

        script.push(env::EDITOR_DISABLED.to_string());
        script.push(shell_command.to_string());

        Ok(script)
    }
}

fn quote(value: &str) -> Result<String, VcsError> {
    shlex::try_quote(value)
        .map(|quoted| quoted.into_owned())
        .map_err(|e| VcsError::InvalidArgument(format!("{value:?}: {e}")))
}
