//! git invocation as an argument list
//!
//! Commands are built from literal flags and caller-supplied values. Only
//! when handed to the process runner are they flattened into a command line,
//! at which point every value is shell-quoted.

use crate::error::VcsError;

use super::constants::REMOTE_TRANSPORT_PREFIXES;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    /// Fixed token written verbatim (subcommands, flags)
    Literal(&'static str),
    /// Caller-supplied token, quoted when rendered
    Value(String),
}

impl Arg {
    fn as_str(&self) -> &str {
        match self {
            Arg::Literal(s) => s,
            Arg::Value(s) => s,
        }
    }
}

/// Arguments of one git invocation, without the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<Arg>,
}

impl GitCommand {
    /// Start a command with a subcommand or global flag
    pub fn new(first: &'static str) -> Self {
        Self {
            args: vec![Arg::Literal(first)],
        }
    }

    /// Append a literal flag or subcommand
    pub fn flag(mut self, flag: &'static str) -> Self {
        self.args.push(Arg::Literal(flag));
        self
    }

    /// Append a literal flag when `enabled`
    pub fn flag_if(self, enabled: bool, flag: &'static str) -> Self {
        if enabled { self.flag(flag) } else { self }
    }

    /// Append a value (branch, path, url, message, ...)
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Value(value.into()));
        self
    }

    /// Append a value when present
    pub fn arg_opt<S: Into<String>>(self, value: Option<S>) -> Self {
        match value {
            Some(value) => self.arg(value),
            None => self,
        }
    }

    /// The unquoted arguments
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(Arg::as_str)
    }

    /// Whether this command talks to a remote (push, pull or fetch)
    pub fn is_remote_transport(&self) -> bool {
        self.args.first().is_some_and(|first| {
            REMOTE_TRANSPORT_PREFIXES
                .iter()
                .any(|prefix| first.as_str().starts_with(prefix))
        })
    }

    /// Flatten into a command line with every value shell-quoted
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::InvalidArgument`] if a value contains a NUL byte.
    pub fn to_command_line(&self) -> Result<String, VcsError> {
        let mut parts = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            match arg {
                Arg::Literal(s) => parts.push((*s).to_string()),
                Arg::Value(s) => {
                    let quoted = shlex::try_quote(s)
                        .map_err(|e| VcsError::InvalidArgument(format!("{s:?}: {e}")))?;
                    parts.push(quoted.into_owned());
                }
            }
        }
        Ok(parts.join(" "))
    }
}
