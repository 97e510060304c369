use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, health::health, init::init, scan::scan, sync::sync},
};

/// Dispatch to the handler for the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(args)) => scan(args),
        Some(Command::Sync(args)) => sync(args),
        Some(Command::Health(args)) => health(args),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
