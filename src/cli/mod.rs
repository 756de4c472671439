//! Command line interface
//!
//! Argument parsing and the retrieval entry point used by the `keysword`
//! binary.

pub mod args;
pub mod retrieve;

pub use args::{Cli, normalize_args};
pub use retrieve::run_retrieve_mode;
