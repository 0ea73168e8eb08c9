use anyhow::Result;

use super::super::args::StatsCommand;
use super::{CommandResult, CommandSummary, FileStats, StatsSummary, helper::finish};
use crate::workspace::Workspace;

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let workspace = Workspace::load(&cmd.common.overrides())?;
    Ok(stats_workspace(&workspace, cmd.contexts))
}

pub fn stats_workspace(workspace: &Workspace, with_contexts: bool) -> CommandResult {
    let files = workspace
        .catalogs
        .iter()
        .map(|loaded| FileStats {
            file_path: loaded.display_path.clone(),
            language: loaded.catalog.language.clone(),
            stats: loaded.catalog.stats(),
            contexts: if with_contexts {
                loaded
                    .catalog
                    .contexts
                    .iter()
                    .map(|ctx| (ctx.name.clone(), ctx.stats()))
                    .collect()
            } else {
                Vec::new()
            },
        })
        .collect();

    finish(
        CommandSummary::Stats(StatsSummary { files }),
        Vec::new(),
        workspace,
        false,
    )
}
