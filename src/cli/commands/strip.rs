use anyhow::Result;

use super::super::args::StripCommand;
use super::{
    CommandResult, CommandSummary, StripSummary,
    helper::{finish, save_all},
};
use crate::workspace::Workspace;

pub fn strip(cmd: StripCommand) -> Result<CommandResult> {
    let mut workspace = Workspace::load(&cmd.common.overrides())?;
    strip_workspace(&mut workspace, cmd.apply)
}

/// Remove location hints. Location hints are advisory, so nothing else in
/// the catalog changes.
pub fn strip_workspace(workspace: &mut Workspace, apply: bool) -> Result<CommandResult> {
    let mut files = Vec::new();
    let mut changed = Vec::new();

    for loaded in &mut workspace.catalogs {
        let removed = loaded.catalog.strip_locations();
        if removed == 0 {
            continue;
        }
        files.push((loaded.display_path.clone(), removed));
        changed.push(&*loaded);
    }

    if apply {
        save_all(&changed)?;
    }

    Ok(finish(
        CommandSummary::Strip(StripSummary {
            files,
            is_apply: apply,
        }),
        Vec::new(),
        workspace,
        false,
    ))
}
