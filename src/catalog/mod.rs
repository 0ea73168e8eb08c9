//! In-memory model of a Qt Linguist translation source (`.ts`) catalog.
//!
//! A catalog is an ordered list of contexts. Each context groups the
//! translatable messages of one UI class (an action, a dialog) under its
//! name. Order is significant: the writer reproduces the order the
//! extraction tool produced, so diffs stay minimal.
//!
//! ## Submodules
//!
//! - `reader`: pull-parser from XML into [`Catalog`]
//! - `writer`: serializer back to the lupdate layout
//! - `stats`: completion counters

pub mod reader;
pub mod stats;
pub mod writer;

use std::fmt;

use serde::Serialize;

pub use reader::{ParseError, ParsedCatalog, SourceMap, parse_file, parse_str};
pub use stats::CatalogStats;
pub use writer::{to_string, write_file};

/// A whole `.ts` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Format version from `<TS version="…">`.
    pub version: Option<String>,
    /// Target language, e.g. `pt_BR`.
    pub language: Option<String>,
    pub source_language: Option<String>,
    /// Root children other than contexts (`<dependencies>`), as raw XML.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_elements: Vec<String>,
    pub contexts: Vec<Context>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Unmodeled children, kept as raw XML and written back after `<comment>`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_elements: Vec<String>,
    pub messages: Vec<Message>,
}

/// One translatable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Plural message (`numerus="yes"`); its translation holds one form per plural rule.
    pub numerus: bool,
    pub locations: Vec<Location>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// Disambiguation comment. Part of the message identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    pub translation: Translation,
    /// `<userdata>`, `<extra-*>` and other unmodeled children, as raw XML.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_elements: Vec<String>,
}

/// Where a message was found in the application sources.
///
/// Purely advisory: the runtime never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Omitted by lupdate when it repeats the previous location's file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Absolute(u32),
    /// Offset from the previous location, written `+N` / `-N`.
    Relative(i32),
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Absolute(line) => write!(f, "{}", line),
            LineRef::Relative(offset) => write!(f, "{:+}", offset),
        }
    }
}

impl Serialize for LineRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub status: TranslationStatus,
    pub forms: TranslationForms,
}

impl Default for Translation {
    fn default() -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            forms: TranslationForms::Single(String::new()),
        }
    }
}

impl Translation {
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Finished,
            forms: TranslationForms::Single(text.into()),
        }
    }

    pub fn unfinished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            forms: TranslationForms::Single(text.into()),
        }
    }

    /// Text of a singular translation, or the first numerus form or length variant.
    pub fn text(&self) -> &str {
        match &self.forms {
            TranslationForms::Single(text) => text,
            TranslationForms::Numerus(forms) | TranslationForms::Variants(forms) => {
                forms.first().map(String::as_str).unwrap_or("")
            }
        }
    }

    /// True if the translation or any of its plural forms or variants is empty.
    pub fn has_empty_form(&self) -> bool {
        match &self.forms {
            TranslationForms::Single(text) => text.is_empty(),
            TranslationForms::Numerus(forms) | TranslationForms::Variants(forms) => {
                forms.is_empty() || forms.iter().any(String::is_empty)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum TranslationForms {
    Single(String),
    Numerus(Vec<String>),
    /// Length variants (`variants="yes"`), longest first. The runtime picks
    /// the first one that fits the widget.
    Variants(Vec<String>),
}

/// Completion marker, stored in the `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// No `type` attribute.
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationStatus {
    /// Value of the `type` attribute, `None` for finished translations.
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Obsolete => Some("obsolete"),
            TranslationStatus::Vanished => Some("vanished"),
        }
    }

    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationStatus::Unfinished),
            "obsolete" => Some(TranslationStatus::Obsolete),
            "vanished" => Some(TranslationStatus::Vanished),
            _ => None,
        }
    }

    /// Obsolete and vanished messages no longer exist in the application sources.
    pub fn is_stale(self) -> bool {
        matches!(self, TranslationStatus::Obsolete | TranslationStatus::Vanished)
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute().unwrap_or("finished"))
    }
}

impl Message {
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        Self {
            source: source.into(),
            translation,
            ..Self::default()
        }
    }

    pub fn with_location(mut self, filename: &str, line: u32) -> Self {
        self.locations.push(Location {
            filename: Some(filename.to_string()),
            line: Some(LineRef::Absolute(line)),
        });
        self
    }

    pub fn status(&self) -> TranslationStatus {
        self.translation.status
    }

    /// Finished with no empty form.
    pub fn is_translated(&self) -> bool {
        self.status() == TranslationStatus::Finished && !self.translation.has_empty_form()
    }

    /// Messages are identified within a context by source text plus disambiguation comment.
    pub fn key(&self) -> (&str, &str) {
        (&self.source, self.comment.as_deref().unwrap_or(""))
    }
}

/// A message dropped by [`Catalog::remove_obsolete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedMessage {
    pub context: String,
    pub source: String,
    pub status: TranslationStatus,
}

impl Catalog {
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// All messages in document order, paired with their context.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx, msg)))
    }

    pub fn location_count(&self) -> usize {
        self.messages().map(|(_, msg)| msg.locations.len()).sum()
    }

    /// Drop every location hint. Returns how many were removed.
    pub fn strip_locations(&mut self) -> usize {
        let mut removed = 0;
        for msg in self.contexts.iter_mut().flat_map(|c| c.messages.iter_mut()) {
            removed += msg.locations.len();
            msg.locations.clear();
        }
        removed
    }

    /// Drop obsolete and vanished messages, and any context left empty by that.
    pub fn remove_obsolete(&mut self) -> Vec<RemovedMessage> {
        let mut removed = Vec::new();
        let mut emptied = Vec::new();
        for (index, ctx) in self.contexts.iter_mut().enumerate() {
            let before = removed.len();
            let name = &ctx.name;
            ctx.messages.retain(|msg| {
                if msg.status().is_stale() {
                    removed.push(RemovedMessage {
                        context: name.clone(),
                        source: msg.source.clone(),
                        status: msg.status(),
                    });
                    false
                } else {
                    true
                }
            });
            if removed.len() > before && ctx.messages.is_empty() && ctx.extra_elements.is_empty() {
                emptied.push(index);
            }
        }
        let mut index = 0;
        self.contexts.retain(|_| {
            let keep = !emptied.contains(&index);
            index += 1;
            keep
        });
        removed
    }

    pub fn stats(&self) -> CatalogStats {
        self.contexts.iter().map(Context::stats).sum()
    }
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for msg in &self.messages {
            stats.record(msg.status());
        }
        stats
    }
}
