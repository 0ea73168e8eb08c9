use super::super::exit_status::ExitStatus;
use crate::{
    catalog::{CatalogStats, RemovedMessage},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Stats(StatsSummary),
    Fmt(FmtSummary),
    Strip(StripSummary),
    Clean(CleanSummary),
    Export(ExportSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct FileStats {
    pub file_path: String,
    pub language: Option<String>,
    pub stats: CatalogStats,
    /// Per-context counts, in document order. Empty unless requested.
    pub contexts: Vec<(String, CatalogStats)>,
}

#[derive(Debug)]
pub struct StatsSummary {
    pub files: Vec<FileStats>,
}

#[derive(Debug)]
pub struct FmtSummary {
    /// Files whose layout differs from the canonical one.
    pub changed_files: Vec<String>,
    pub is_check: bool,
}

#[derive(Debug)]
pub struct StripSummary {
    /// (file, number of location hints) for files that have any.
    pub files: Vec<(String, usize)>,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct CleanSummary {
    pub files: Vec<(String, Vec<RemovedMessage>)>,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct ExportSummary {
    pub json: String,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running tsctl commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Issues found during the check, plus parse errors for every command.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of catalog files that were read.
    pub files_checked: usize,
    pub exit_status: ExitStatus,
}
