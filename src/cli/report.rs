//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format,
//! plus the per-command summaries. Separate from core logic to allow tsctl
//! to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CleanSummary, CommandResult, CommandSummary, FmtSummary, InitSummary, StatsSummary,
    StripSummary,
};
use crate::catalog::CatalogStats;
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a writer.
///
/// Issues are sorted by file and line, then followed by a summary line.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} catalog {} - no issues found",
            files,
            plural(files, "file", "files")
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Print the output of any command to stdout, and parse warnings to stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, &mut io::stdout().lock(), &mut io::stderr().lock());
    print_parse_warning_to(result.parse_error_count, verbose, &mut io::stderr().lock());
}

/// Print a command's output to `writer`.
///
/// `export` writes machine-readable JSON, so its issues go to `diagnostics`
/// instead.
pub fn print_to<W: Write, E: Write>(result: &CommandResult, writer: &mut W, diagnostics: &mut E) {
    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, writer);
            if result.issues.is_empty() {
                print_success_to(result.files_checked, writer);
            }
            return;
        }
        CommandSummary::Stats(summary) => print_stats(summary, writer),
        CommandSummary::Fmt(summary) => print_fmt(summary, result.files_checked, writer),
        CommandSummary::Strip(summary) => print_strip(summary, writer),
        CommandSummary::Clean(summary) => print_clean(summary, writer),
        CommandSummary::Export(summary) => {
            let _ = writeln!(writer, "{}", summary.json);
            report_to(&result.issues, diagnostics);
            return;
        }
        CommandSummary::Init(summary) => print_init(summary, writer),
    }

    // Other commands only carry parse errors.
    if !result.issues.is_empty() {
        let _ = writeln!(writer);
        report_to(&result.issues, writer);
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Catalog(loc) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                loc.file_path,
                loc.line,
                loc.col
            );
            print_source_excerpt(
                &loc.source_line,
                loc.line,
                loc.col,
                severity,
                writer,
                max_line_width,
            );
        }
        ReportLocation::File { path, line } => {
            let _ = match line {
                Some(line) => writeln!(writer, "  {} {}:{}", "-->".blue(), path, line),
                None => writeln!(writer, "  {} {}", "-->".blue(), path),
            };
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_source_excerpt<W: Write>(
    source_line: &str,
    line: usize,
    col: usize,
    severity: Severity,
    writer: &mut W,
    max_line_width: usize,
) {
    if source_line.is_empty() {
        return;
    }

    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = max_line_width
    );

    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem", "problems"),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn location_key(loc: ReportLocation<'_>) -> (&str, usize, usize) {
    match loc {
        ReportLocation::Catalog(loc) => (loc.file_path.as_str(), loc.line, loc.col),
        ReportLocation::File { path, line } => (path, line.unwrap_or(0), 0),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Catalog(loc) => Some(loc.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    location_key(a.location())
        .cmp(&location_key(b.location()))
        .then_with(|| a.report_rule().cmp(&b.report_rule()))
}

// ============================================================
// Command summaries
// ============================================================

fn format_stats(stats: &CatalogStats) -> String {
    let mut line = format!(
        "{}/{} finished ({:.1}%)",
        stats.finished,
        stats.active(),
        stats.completion_percent()
    );
    if stats.unfinished > 0 {
        line.push_str(&format!(", {} unfinished", stats.unfinished));
    }
    let stale = stats.obsolete + stats.vanished;
    if stale > 0 {
        line.push_str(&format!(", {} obsolete", stale));
    }
    line
}

fn print_stats<W: Write>(summary: &StatsSummary, writer: &mut W) {
    for file in &summary.files {
        let language = file
            .language
            .as_deref()
            .map(|l| format!(" [{}]", l))
            .unwrap_or_default();
        let stats_line = format_stats(&file.stats);
        let stats_line = if file.stats.unfinished == 0 {
            stats_line.green()
        } else {
            stats_line.yellow()
        };
        let _ = writeln!(writer, "{}{}: {}", file.file_path.bold(), language, stats_line);

        for (name, stats) in &file.contexts {
            let _ = writeln!(writer, "    {}: {}", name, format_stats(stats));
        }
    }

    if summary.files.len() > 1 {
        let total: CatalogStats = summary.files.iter().map(|f| f.stats).sum();
        let _ = writeln!(writer, "{}: {}", "Total".bold(), format_stats(&total));
    }
}

fn print_fmt<W: Write>(summary: &FmtSummary, files_checked: usize, writer: &mut W) {
    if summary.changed_files.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} catalog {} already formatted",
                files_checked,
                plural(files_checked, "file", "files")
            )
            .green()
        );
        return;
    }

    let verb = if summary.is_check {
        "Would reformat".yellow().bold()
    } else {
        "Formatted".green().bold()
    };
    for file in &summary.changed_files {
        let _ = writeln!(writer, "{} {}", verb, file);
    }
    if summary.is_check {
        let _ = writeln!(
            writer,
            "Run {} to rewrite these files.",
            "tsctl fmt".cyan()
        );
    }
}

fn print_strip<W: Write>(summary: &StripSummary, writer: &mut W) {
    let total: usize = summary.files.iter().map(|(_, n)| n).sum();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No location hints found".green()
        );
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} location hint(s) in {} file(s).",
            "Removed".green().bold(),
            total,
            summary.files.len()
        );
    } else {
        for (file, count) in &summary.files {
            let _ = writeln!(writer, "  {}: {} location hint(s)", file, count);
        }
        let _ = writeln!(
            writer,
            "{} {} location hint(s) in {} file(s).",
            "Would remove".yellow().bold(),
            total,
            summary.files.len()
        );
        let _ = writeln!(writer, "Run with {} to remove them.", "--apply".cyan());
    }
}

fn print_clean<W: Write>(summary: &CleanSummary, writer: &mut W) {
    let total: usize = summary.files.iter().map(|(_, removed)| removed.len()).sum();
    if total == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No obsolete messages found".green()
        );
        return;
    }

    if !summary.is_apply {
        for (file, removed) in &summary.files {
            let _ = writeln!(writer, "{}", file.bold());
            for message in removed {
                let _ = writeln!(
                    writer,
                    "  - {}: \"{}\" ({})",
                    message.context,
                    message.source,
                    message.status.to_string().dimmed()
                );
            }
        }
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} message(s) in {} file(s).",
            "Deleted".green().bold(),
            total,
            summary.files.len()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} message(s) in {} file(s).",
            "Would delete".yellow().bold(),
            total,
            summary.files.len()
        );
        let _ = writeln!(writer, "Run with {} to delete these messages.", "--apply".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
