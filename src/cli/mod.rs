//! Command-line interface layer.
//!
//! `args` defines the clap surface, `run` dispatches to `commands`, and
//! `report` renders a [`commands::CommandResult`] for the terminal.

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{
    Arguments, CheckCommand, CleanCommand, Command, CommonArgs, ExportCommand, FmtCommand,
    StatsCommand, StripCommand,
};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(result.exit_status)
}
