use anyhow::Result;

use super::super::args::CleanCommand;
use super::{
    CleanSummary, CommandResult, CommandSummary,
    helper::{finish, save_all},
};
use crate::workspace::Workspace;

pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let mut workspace = Workspace::load(&cmd.common.overrides())?;
    clean_workspace(&mut workspace, cmd.apply)
}

pub fn clean_workspace(workspace: &mut Workspace, apply: bool) -> Result<CommandResult> {
    let mut files = Vec::new();
    let mut changed = Vec::new();

    for loaded in &mut workspace.catalogs {
        let removed = loaded.catalog.remove_obsolete();
        if removed.is_empty() {
            continue;
        }
        files.push((loaded.display_path.clone(), removed));
        changed.push(&*loaded);
    }

    if apply {
        save_all(&changed)?;
    }

    Ok(finish(
        CommandSummary::Clean(CleanSummary {
            files,
            is_apply: apply,
        }),
        Vec::new(),
        workspace,
        false,
    ))
}
