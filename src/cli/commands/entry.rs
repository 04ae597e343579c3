//! Single-key commands: `get`, `set`, `remove` and `contains`.
//!
//! Known keys carry their type; other keys need `--type`.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use crate::accessor::PrefType;
use crate::cli::args::{GetArgs, KeyArgs, SetArgs};
use crate::error::{PrefError, Result};
use crate::keys;
use crate::store::Context;

use super::dispatcher::{Command, CommandResult};

/// Pick the type for `key`: the explicit one, else the known key's type.
pub fn resolve_type(key: &str, explicit: Option<PrefType>) -> Result<PrefType> {
    if let Some(pref_type) = explicit {
        return Ok(pref_type);
    }
    keys::lookup(key)
        .map(|spec| spec.pref_type)
        .ok_or_else(|| anyhow::anyhow!("Unknown key '{}': pass --type to choose a type", key).into())
}

/// Read `key` through the accessor for `pref_type`, rendered for output.
///
/// String set members are rendered one per line.
pub fn read_rendered(ctx: &Context, key: &str, pref_type: PrefType) -> Result<Option<String>> {
    let rendered = match pref_type {
        PrefType::Int => ctx.int_pref(key).read()?.map(|v| v.to_string()),
        PrefType::Long => ctx.long_pref(key).read()?.map(|v| v.to_string()),
        PrefType::Float => ctx.float_pref(key).read()?.map(|v| v.to_string()),
        PrefType::Double => ctx.double_pref(key).read()?.map(|v| v.to_string()),
        PrefType::Bool => ctx.bool_pref(key).read()?.map(|v| v.to_string()),
        PrefType::String => ctx.string_pref(key).read()?,
        PrefType::StringSet => ctx
            .string_set_pref(key)
            .read()?
            .map(|set| set.into_iter().collect::<Vec<_>>().join("\n")),
    };
    Ok(rendered)
}

fn parse_one<T>(key: &str, pref_type: PrefType, values: &[String]) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let invalid = |message: String| PrefError::InvalidValue {
        key: key.to_string(),
        kind: pref_type.to_string(),
        message,
    };

    match values {
        [raw] => raw.parse().map_err(|e: T::Err| invalid(e.to_string())),
        _ => Err(invalid(format!(
            "expected exactly one value, got {}",
            values.len()
        ))),
    }
}

/// Parse `values` as `pref_type` and write them through the matching accessor.
pub fn write_parsed(
    ctx: &Context,
    key: &str,
    pref_type: PrefType,
    values: &[String],
) -> Result<()> {
    match pref_type {
        PrefType::Int => ctx.int_pref(key).set(parse_one(key, pref_type, values)?),
        PrefType::Long => ctx.long_pref(key).set(parse_one(key, pref_type, values)?),
        PrefType::Float => ctx.float_pref(key).set(parse_one(key, pref_type, values)?),
        PrefType::Double => ctx.double_pref(key).set(parse_one(key, pref_type, values)?),
        PrefType::Bool => ctx.bool_pref(key).set(parse_one(key, pref_type, values)?),
        PrefType::String => ctx.string_pref(key).set(parse_one(key, pref_type, values)?),
        PrefType::StringSet => ctx
            .string_set_pref(key)
            .set(values.iter().cloned().collect()),
    }
}

/// The `get` command implementation.
pub struct GetCommand {
    args: GetArgs,
}

impl GetCommand {
    pub fn new(args: GetArgs) -> Self {
        Self { args }
    }
}

impl Command for GetCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult> {
        let pref_type = resolve_type(&self.args.key, self.args.pref_type)?;

        match read_rendered(ctx, &self.args.key, pref_type)? {
            Some(rendered) => {
                writeln!(out, "{}", rendered)?;
                Ok(CommandResult::success())
            }
            None => {
                tracing::debug!("Key '{}' is not set", self.args.key);
                Ok(CommandResult::failure(1))
            }
        }
    }
}

/// The `set` command implementation.
pub struct SetCommand {
    args: SetArgs,
}

impl SetCommand {
    pub fn new(args: SetArgs) -> Self {
        Self { args }
    }
}

impl Command for SetCommand {
    fn execute(&self, ctx: &Context, _out: &mut dyn Write) -> Result<CommandResult> {
        let pref_type = resolve_type(&self.args.key, self.args.pref_type)?;
        write_parsed(ctx, &self.args.key, pref_type, &self.args.values)?;
        Ok(CommandResult::success())
    }
}

/// The `remove` command implementation.
pub struct RemoveCommand {
    args: KeyArgs,
}

impl RemoveCommand {
    pub fn new(args: KeyArgs) -> Self {
        Self { args }
    }
}

impl Command for RemoveCommand {
    fn execute(&self, ctx: &Context, _out: &mut dyn Write) -> Result<CommandResult> {
        ctx.default_preferences()?
            .edit()
            .remove(&self.args.key)
            .commit()?;
        Ok(CommandResult::success())
    }
}

/// The `contains` command implementation.
pub struct ContainsCommand {
    args: KeyArgs,
}

impl ContainsCommand {
    pub fn new(args: KeyArgs) -> Self {
        Self { args }
    }
}

impl Command for ContainsCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> Result<CommandResult> {
        let present = ctx.default_preferences()?.contains(&self.args.key);
        writeln!(out, "{}", present)?;
        Ok(if present {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}
