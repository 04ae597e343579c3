//! Command implementations.

pub mod completions;
pub mod dispatcher;
pub mod entry;
pub mod profile;
pub mod store;

pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use entry::{ContainsCommand, GetCommand, RemoveCommand, SetCommand};
pub use profile::{SeedCommand, ShowCommand};
pub use store::{ClearCommand, ListCommand};
