use anyhow::Result;

use super::super::exit_status::ExitStatus;
use super::{CommandResult, CommandSummary};
use crate::{
    issues::{Issue, Severity},
    workspace::{LoadedCatalog, Workspace},
};

/// Write back changed catalogs. Nothing is written unless every one of them
/// can be rewritten without losing content.
pub fn save_all(changed: &[&LoadedCatalog]) -> Result<()> {
    for loaded in changed {
        loaded.ensure_rewritable()?;
    }
    for loaded in changed {
        loaded.save()?;
        tracing::debug!("Wrote {}", loaded.display_path);
    }
    Ok(())
}

/// Assemble a [`CommandResult`] from a command's summary and issues.
///
/// Parse errors from loading are always appended. The exit status is
/// `Failure` when any error remains, when `fail_on_warnings` is set and a
/// warning remains, or when the command itself requests it.
pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    workspace: &Workspace,
    command_failed: bool,
) -> CommandResult {
    issues.extend(workspace.parse_errors.iter().cloned().map(Issue::ParseError));

    let parse_error_count = workspace.parse_errors.len();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    let failed = command_failed
        || error_count > 0
        || (workspace.config.fail_on_warnings && warning_count > 0);

    CommandResult {
        summary,
        issues,
        parse_error_count,
        files_checked: workspace.file_count(),
        exit_status: if failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        },
    }
}
