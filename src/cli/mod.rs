//! Command line and terminal plumbing for docknav.
//!
//! - args: Command line argument parsing
//! - format: Human readable sizes and timestamps
//! - terminal: Raw mode / alternate screen guard

pub mod args;
pub mod format;
pub mod terminal;

pub use args::Cli;
pub use format::{format_size, format_time_ago, format_unix_time_ago, truncate};
pub use terminal::TerminalGuard;
