//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Run catalog checks (duplicates, unfinished, obsolete, ...)
//! - `stats`: Print translation completion per file and context
//! - `fmt`: Rewrite catalogs in the canonical lupdate layout
//! - `strip`: Remove `<location>` hints
//! - `clean`: Remove obsolete and vanished messages
//! - `export`: Dump catalogs as JSON
//! - `init`: Initialize tsctl configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::{issues::Rule, workspace::Overrides};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by all commands that read catalogs.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Catalog files or directories (default: the configured translations root)
    pub paths: Vec<PathBuf>,

    /// Translations root directory (overrides config file)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            translations_root: self.root.clone(),
            paths: self.paths.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all).
    /// Can be specified multiple times: --rule unfinished --rule obsolete
    #[arg(long = "rule", value_enum)]
    pub rules: Vec<Rule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Also list every context
    #[arg(long)]
    pub contexts: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FmtCommand {
    /// Only report files that are not formatted (exit 1 if any)
    #[arg(long)]
    pub check: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StripCommand {
    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    /// Actually delete messages (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs for duplicates, unfinished, untranslated and obsolete messages
    Check(CheckCommand),
    /// Show translation completion per catalog
    Stats(StatsCommand),
    /// Rewrite catalogs in the canonical lupdate layout
    Fmt(FmtCommand),
    /// Remove <location> hints from catalogs
    Strip(StripCommand),
    /// Remove obsolete and vanished messages from catalogs
    Clean(CleanCommand),
    /// Print catalogs as JSON
    Export(ExportCommand),
    /// Initialize a new .tsctlrc.json configuration file
    Init,
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Check(cmd) => Some(&cmd.common),
            Command::Stats(cmd) => Some(&cmd.common),
            Command::Fmt(cmd) => Some(&cmd.common),
            Command::Strip(cmd) => Some(&cmd.common),
            Command::Clean(cmd) => Some(&cmd.common),
            Command::Export(cmd) => Some(&cmd.common),
            Command::Init => None,
        }
    }
}
