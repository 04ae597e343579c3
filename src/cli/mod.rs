//! Command-line interface for prefstore.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ClearArgs, Cli, Commands, CompletionsArgs, GetArgs, KeyArgs, ListArgs, SetArgs, ShowArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
