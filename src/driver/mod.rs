//! Session driver
//!
//! This module handles:
//! - The command-line flags, shared by the binary and command scripts
//! - The closed set of [`Command`]s a session understands
//! - Parsing command scripts into commands before anything runs
//! - Executing commands in order against a [`Session`]

mod cli;
mod command;
mod session;

pub use cli::Cli;
pub use command::{parse_line, parse_script, parse_target, split_tags, validate_commands, Command};
pub use session::{media_file_name, text_matches, Session};
