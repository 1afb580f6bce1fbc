//! git output parser
//!
//! Turns the line-oriented output of `git log`, `git show`, `git ls-tree` and
//! `git branch` into structured data. Parsing never fails: lines that do not
//! look structural are kept as message text or skipped.

mod branch;
mod log;
mod tree;


/// Parser for git command output
pub struct Parser;
