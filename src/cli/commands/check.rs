use anyhow::Result;
use rayon::prelude::*;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};
use crate::{
    issues::{Issue, Rule},
    rules::run_rules,
    workspace::Workspace,
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let workspace = Workspace::load(&cmd.common.overrides())?;
    Ok(check_workspace(&workspace, &cmd.rules))
}

pub fn check_workspace(workspace: &Workspace, rules: &[Rule]) -> CommandResult {
    let rules = if rules.is_empty() { Rule::CHECKS } else { rules };

    let issues: Vec<Issue> = workspace
        .catalogs
        .par_iter()
        .flat_map_iter(|catalog| run_rules(catalog, rules, &workspace.config))
        .collect();

    finish(CommandSummary::Check, issues, workspace, false)
}
