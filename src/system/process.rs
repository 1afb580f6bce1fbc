//! Process execution boundary

use std::io;
use std::process::Command;

#[cfg(test)]
use mockall::automock;

/// Shell used for both plain command lines and multi-statement scripts
const SHELL: &str = "sh";

/// Captured result of one process invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output split into lines, trailing whitespace removed
    pub lines: Vec<String>,
    /// Exit code of the process (-1 when terminated by a signal)
    pub exit_code: i32,
    /// Standard error, trailing whitespace removed
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs command lines on behalf of the git client.
///
/// The runner inherits the current working directory of the process; the
/// caller is responsible for changing it beforehand.
#[cfg_attr(test, automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run a single command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, command: &str) -> io::Result<ProcessOutput>;

    /// Run an ordered list of shell statements as one script.
    ///
    /// Environment exported by earlier statements is visible to later ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned.
    fn run_script(&self, statements: &[String]) -> io::Result<ProcessOutput>;
}

/// Runner backed by `sh -c`
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveProcessRunner;

impl LiveProcessRunner {
    fn spawn(script: &str) -> io::Result<ProcessOutput> {
        let output = Command::new(SHELL).arg("-c").arg(script).output()?;
        let exit_code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();

        if !output.status.success() {
            tracing::debug!(exit_code, stderr = %stderr, "process failed");
        }

        Ok(ProcessOutput {
            lines: split_lines(&String::from_utf8_lossy(&output.stdout)),
            exit_code,
            stderr,
        })
    }
}

impl ProcessRunner for LiveProcessRunner {
    fn run(&self, command: &str) -> io::Result<ProcessOutput> {
        Self::spawn(command)
    }

    fn run_script(&self, statements: &[String]) -> io::Result<ProcessOutput> {
        Self::spawn(&statements.join("\n"))
    }
}

fn split_lines(stdout: &str) -> Vec<String> {
    stdout.lines().map(|line| line.trim_end().to_string()).collect()
}
