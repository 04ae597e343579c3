//! Whole-store commands: `list` and `clear`.

use std::io::Write;

use crate::cli::args::{ClearArgs, ListArgs};
use crate::error::Result;
use crate::store::Context;

use super::dispatcher::{Command, CommandResult};

/// The `list` command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult> {
        let prefs = ctx.default_preferences()?;
        let entries = prefs.all();

        for (key, value) in &entries {
            tracing::debug!("{}: {}", key, value);
        }

        if self.args.json {
            let json = entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), value.to_json()?)))
                .collect::<serde_json::Result<serde_json::Map<_, _>>>()
                .and_then(|map| serde_json::to_string_pretty(&map))
                .map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            writeln!(out, "Store '{}' is empty", prefs.name())?;
            return Ok(CommandResult::success());
        }

        for (key, value) in &entries {
            writeln!(out, "{} ({}) = {}", key, value.kind(), value)?;
        }
        Ok(CommandResult::success())
    }
}

/// The `clear` command implementation.
pub struct ClearCommand {
    args: ClearArgs,
}

impl ClearCommand {
    pub fn new(args: ClearArgs) -> Self {
        Self { args }
    }
}

impl Command for ClearCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult> {
        let prefs = ctx.default_preferences()?;
        let count = prefs.len();

        if count == 0 {
            writeln!(out, "Store '{}' is already empty", prefs.name())?;
            return Ok(CommandResult::success());
        }

        if !self.args.force {
            writeln!(
                out,
                "Refusing to clear {} entries from '{}' without --force",
                count,
                prefs.name()
            )?;
            return Ok(CommandResult::failure(1));
        }

        prefs.edit().clear().commit()?;
        writeln!(out, "Cleared {} entries", count)?;
        Ok(CommandResult::success())
    }
}
