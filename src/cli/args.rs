//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::accessor::PrefType;

/// prefstore - Typed, durable key-value preferences.
#[derive(Debug, Parser)]
#[command(name = "prefstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides <config_dir>/prefstore/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the store files
    #[arg(long, global = true, env = "PREFSTORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Store to operate on (default: shared_preferences)
    #[arg(short, long, global = true)]
    pub store: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read a typed value
    Get(GetArgs),

    /// Write a typed value
    Set(SetArgs),

    /// Remove a key
    Remove(KeyArgs),

    /// Check whether a key holds a value
    Contains(KeyArgs),

    /// List every raw entry in the store
    List(ListArgs),

    /// Remove every entry in the store
    Clear(ClearArgs),

    /// Write the sample profile
    Seed,

    /// Read and print the profile
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GetArgs {
    /// Key to read
    pub key: String,

    /// Value type (inferred for known keys)
    #[arg(short = 't', long = "type", value_enum)]
    pub pref_type: Option<PrefType>,
}

/// Arguments for the `set` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetArgs {
    /// Key to write
    pub key: String,

    /// Value to store; string sets take one value per member
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Value type (inferred for known keys)
    #[arg(short = 't', long = "type", value_enum)]
    pub pref_type: Option<PrefType>,
}

/// Arguments for commands taking a single key.
#[derive(Debug, Clone, clap::Args)]
pub struct KeyArgs {
    /// Key to operate on
    pub key: String,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ClearArgs {
    /// Clear without refusing on a non-empty store
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
