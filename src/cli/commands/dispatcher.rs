//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::store::Context;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command against `ctx`, writing user-facing output to `out`.
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit code for the process. Codes outside `0..=255` become 1.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: Context,
}

impl CommandDispatcher {
    /// Create a new dispatcher operating on `context`.
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Get the context commands run against.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let ctx = &self.context;
        match &cli.command {
            Commands::Get(args) => super::entry::GetCommand::new(args.clone()).execute(ctx, out),
            Commands::Set(args) => super::entry::SetCommand::new(args.clone()).execute(ctx, out),
            Commands::Remove(args) => {
                super::entry::RemoveCommand::new(args.clone()).execute(ctx, out)
            }
            Commands::Contains(args) => {
                super::entry::ContainsCommand::new(args.clone()).execute(ctx, out)
            }
            Commands::List(args) => super::store::ListCommand::new(args.clone()).execute(ctx, out),
            Commands::Clear(args) => {
                super::store::ClearCommand::new(args.clone()).execute(ctx, out)
            }
            Commands::Seed => super::profile::SeedCommand.execute(ctx, out),
            Commands::Show(args) => {
                super::profile::ShowCommand::new(args.clone()).execute(ctx, out)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ctx, out)
            }
        }
    }
}
