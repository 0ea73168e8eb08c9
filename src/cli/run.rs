use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, clean::clean, export::export, fmt::fmt, init::init,
        stats::stats, strip::strip,
    },
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Stats(cmd)) => stats(cmd),
        Some(Command::Fmt(cmd)) => fmt(cmd),
        Some(Command::Strip(cmd)) => strip(cmd),
        Some(Command::Clean(cmd)) => clean(cmd),
        Some(Command::Export(cmd)) => export(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
