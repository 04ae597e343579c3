//! Profile commands: `seed` writes the sample profile, `show` reads it back.

use std::io::Write;

use crate::cli::args::ShowArgs;
use crate::error::Result;
use crate::profile::Profile;
use crate::store::Context;

use super::dispatcher::{Command, CommandResult};

/// The `seed` command implementation.
pub struct SeedCommand;

impl Command for SeedCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult> {
        Profile::new(ctx).seed_sample()?;
        writeln!(out, "Seeded sample profile into '{}'", ctx.default_store())?;
        Ok(CommandResult::success())
    }
}

/// The `show` command implementation.
pub struct ShowCommand {
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(args: ShowArgs) -> Self {
        Self { args }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult> {
        let snapshot = Profile::new(ctx).snapshot()?;
        snapshot.log();

        if self.args.json {
            let json = serde_json::to_string_pretty(&snapshot).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            for (key, value) in snapshot.lines() {
                writeln!(out, "{}: {}", key, value)?;
            }
        }
        Ok(CommandResult::success())
    }
}
