//! git command execution layer
//!
//! This module builds git invocations, runs them from a repository's working
//! copy and parses their output.

mod client;
mod command;
pub mod constants;
/// Parser module (public for integration testing)
pub mod parser;
mod repository;
mod ssh_helper;

pub use client::{ExecutionContext, GitClient};
pub use command::GitCommand;
pub use parser::Parser;
pub use repository::GitRepository;
