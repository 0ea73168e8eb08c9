//! Issue types for catalog analysis results.
//!
//! Each issue is self-contained with all information needed by the reporter
//! to display it: the catalog file, the line inside it, and the raw XML line
//! for the source excerpt.

use std::fmt;

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;

use crate::catalog::TranslationStatus;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Rule {
    DuplicateContext,
    DuplicateMessage,
    EmptyTranslation,
    Unfinished,
    Untranslated,
    Obsolete,
    LanguageMismatch,
    #[value(skip)]
    ParseError,
}

impl Rule {
    /// Rules a `check` runs when none are named on the command line.
    pub const CHECKS: &'static [Rule] = &[
        Rule::DuplicateContext,
        Rule::DuplicateMessage,
        Rule::EmptyTranslation,
        Rule::Unfinished,
        Rule::Untranslated,
        Rule::Obsolete,
        Rule::LanguageMismatch,
    ];

    pub fn from_name(name: &str) -> Option<Rule> {
        Self::CHECKS
            .iter()
            .chain(std::iter::once(&Rule::ParseError))
            .copied()
            .find(|rule| rule.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::DuplicateContext => "duplicate-context",
            Rule::DuplicateMessage => "duplicate-message",
            Rule::EmptyTranslation => "empty-translation",
            Rule::Unfinished => "unfinished",
            Rule::Untranslated => "untranslated",
            Rule::Obsolete => "obsolete",
            Rule::LanguageMismatch => "language-mismatch",
            Rule::ParseError => "parse-error",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================
// Location
// ============================================================

/// Position of an issue inside a `.ts` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLocation {
    pub file_path: String,
    /// 1-based line in the XML file.
    pub line: usize,
    /// 1-based column of the first non-blank character.
    pub col: usize,
    /// The raw XML line, shown as the source excerpt.
    pub source_line: String,
    /// Name of the context the issue belongs to, if any.
    pub context_name: Option<String>,
}

impl CatalogLocation {
    pub fn new(file_path: impl Into<String>, line: usize, source_line: impl Into<String>) -> Self {
        let source_line = source_line.into();
        let col = source_line
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| source_line[..i].chars().count() + 1)
            .unwrap_or(1);
        Self {
            file_path: file_path.into(),
            line,
            col,
            source_line,
            context_name: None,
        }
    }

    pub fn in_context(mut self, name: impl Into<String>) -> Self {
        self.context_name = Some(name.into());
        self
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Two `<context>` elements with the same name in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateContextIssue {
    pub location: CatalogLocation,
    pub name: String,
    /// Line of the first context with this name.
    pub first_line: usize,
}

impl DuplicateContextIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateContext
    }
}

/// Same source text and disambiguation comment twice in one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMessageIssue {
    pub location: CatalogLocation,
    pub source: String,
    pub comment: Option<String>,
    pub first_line: usize,
}

impl DuplicateMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateMessage
    }
}

/// Message marked finished whose translation is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTranslationIssue {
    pub location: CatalogLocation,
    pub source: String,
}

impl EmptyTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::EmptyTranslation
    }
}

/// Message still marked unfinished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfinishedIssue {
    pub location: CatalogLocation,
    pub source: String,
    /// Draft translation kept while unfinished, if any.
    pub placeholder: Option<String>,
}

impl UnfinishedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unfinished
    }
}

/// Finished translation identical to its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub location: CatalogLocation,
    pub source: String,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

/// Obsolete or vanished message still kept in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsoleteIssue {
    pub location: CatalogLocation,
    pub source: String,
    pub status: TranslationStatus,
}

impl ObsoleteIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Obsolete
    }
}

/// Catalog `language` attribute differs from the configured language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMismatchIssue {
    pub location: CatalogLocation,
    pub expected: String,
    pub found: Option<String>,
}

impl LanguageMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::LanguageMismatch
    }
}

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub line: Option<usize>,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A catalog issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DuplicateContext(DuplicateContextIssue),
    DuplicateMessage(DuplicateMessageIssue),
    EmptyTranslation(EmptyTranslationIssue),
    Unfinished(UnfinishedIssue),
    Untranslated(UntranslatedIssue),
    Obsolete(ObsoleteIssue),
    LanguageMismatch(LanguageMismatchIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Inside a catalog, with the XML line for context display.
    Catalog(&'a CatalogLocation),
    /// File-level only (for ParseError).
    File { path: &'a str, line: Option<usize> },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on
/// [`Issue`] without a manual match.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (context name, source text, error, ...).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

fn context_note(location: &CatalogLocation) -> Option<String> {
    location
        .context_name
        .as_ref()
        .map(|name| format!("in context {}", name))
}

impl Report for DuplicateContextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.name.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("context first defined at line {}", self.first_line))
    }

    fn hint(&self) -> Option<String> {
        Some("merge the messages into a single <context>".to_string())
    }
}

impl Report for DuplicateMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let context = self
            .location
            .context_name
            .as_deref()
            .map(|name| format!(" in context {}", name))
            .unwrap_or_default();
        let comment = self
            .comment
            .as_deref()
            .map(|c| format!(" (comment \"{}\")", c))
            .unwrap_or_default();
        Some(format!(
            "first defined at line {}{}{}",
            self.first_line, context, comment
        ))
    }
}

impl Report for EmptyTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        context_note(&self.location)
    }

    fn hint(&self) -> Option<String> {
        Some("fill in the translation or mark it type=\"unfinished\"".to_string())
    }
}

impl Report for UnfinishedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        match (&self.placeholder, context_note(&self.location)) {
            (Some(draft), Some(note)) => Some(format!("{}, draft: \"{}\"", note, draft)),
            (Some(draft), None) => Some(format!("draft: \"{}\"", draft)),
            (None, note) => note,
        }
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let note = "translation is identical to the source text";
        Some(match context_note(&self.location) {
            Some(context) => format!("{}, {}", context, note),
            None => note.to_string(),
        })
    }
}

impl Report for ObsoleteIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("message is marked {}", self.status))
    }

    fn hint(&self) -> Option<String> {
        Some("run `tsctl clean --apply` to remove it".to_string())
    }
}

impl Report for LanguageMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.location)
    }

    fn message(&self) -> String {
        self.found.clone().unwrap_or_default()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(match &self.found {
            Some(found) => format!("expected language {}, found {}", self.expected, found),
            None => format!("expected language {}, catalog declares none", self.expected),
        })
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
