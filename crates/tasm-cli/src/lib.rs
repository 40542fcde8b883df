//! Shared plumbing for the `tasm` and `tasm-exec` binaries.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use error::CliError;
