use anyhow::{Context, Result};
use serde::Serialize;

use super::super::args::ExportCommand;
use super::{CommandResult, CommandSummary, ExportSummary, helper::finish};
use crate::{catalog::Catalog, workspace::Workspace};

#[derive(Serialize)]
struct ExportedCatalog<'a> {
    file: &'a str,
    #[serde(flatten)]
    catalog: &'a Catalog,
}

pub fn export(cmd: ExportCommand) -> Result<CommandResult> {
    let workspace = Workspace::load(&cmd.common.overrides())?;
    export_workspace(&workspace, cmd.pretty)
}

pub fn export_workspace(workspace: &Workspace, pretty: bool) -> Result<CommandResult> {
    let exported: Vec<ExportedCatalog<'_>> = workspace
        .catalogs
        .iter()
        .map(|loaded| ExportedCatalog {
            file: &loaded.display_path,
            catalog: &loaded.catalog,
        })
        .collect();

    let json = if pretty {
        serde_json::to_string_pretty(&exported)
    } else {
        serde_json::to_string(&exported)
    }
    .context("Failed to serialize catalogs")?;

    Ok(finish(
        CommandSummary::Export(ExportSummary { json }),
        Vec::new(),
        workspace,
        false,
    ))
}
