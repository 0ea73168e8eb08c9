use anyhow::Result;

use super::super::args::FmtCommand;
use super::{
    CommandResult, CommandSummary, FmtSummary,
    helper::{finish, save_all},
};
use crate::workspace::Workspace;

pub fn fmt(cmd: FmtCommand) -> Result<CommandResult> {
    let workspace = Workspace::load(&cmd.common.overrides())?;
    fmt_workspace(&workspace, cmd.check)
}

/// Rewrite every catalog whose file differs from the canonical layout.
///
/// With `check`, nothing is written and the command fails if any file would change.
pub fn fmt_workspace(workspace: &Workspace, check: bool) -> Result<CommandResult> {
    let changed: Vec<_> = workspace
        .catalogs
        .iter()
        .filter(|loaded| !loaded.is_formatted())
        .collect();

    if !check {
        save_all(&changed)?;
    }
    let changed_files = changed
        .iter()
        .map(|loaded| loaded.display_path.clone())
        .collect::<Vec<_>>();

    let failed = check && !changed_files.is_empty();
    Ok(finish(
        CommandSummary::Fmt(FmtSummary {
            changed_files,
            is_check: check,
        }),
        Vec::new(),
        workspace,
        failed,
    ))
}
