//! Parse `.ts` XML into a [`Catalog`].
//!
//! The reader is a small recursive-descent layer on top of quick-xml's pull
//! parser. Text of `<source>`, `<translation>` and the comment elements is
//! kept exactly as written (after entity unescaping), including leading and
//! trailing whitespace. Whitespace between elements is layout and ignored.
//!
//! Children of `<TS>`, `<context>` and `<message>` this model does not carry
//! (`dependencies`, `userdata`, `extra-*`, ...) are kept as raw XML so the
//! writer can put them back. Anything else that cannot be represented
//! (comments, markup inside text, length variants of plural forms) still
//! loads, but marks the catalog lossy so it is never rewritten.

use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use thiserror::Error;

use super::{
    Catalog, Context, LineRef, Location, Message, Translation, TranslationForms,
    TranslationStatus,
};
use crate::utils::{build_line_index, offset_to_line};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed XML: {source}")]
    Xml {
        line: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("document has no <TS> root element")]
    MissingRoot,
    #[error("line {line}: expected <TS> root element, found <{found}>")]
    UnexpectedRoot { line: usize, found: String },
    #[error("line {line}: document ends inside <{element}>")]
    UnexpectedEof { line: usize, element: &'static str },
    #[error("line {line}: <context> has no <name>")]
    MissingContextName { line: usize },
    #[error("line {line}: <message> has no <source>")]
    MissingSource { line: usize },
    #[error("line {line}: unknown translation type \"{value}\"")]
    InvalidStatus { line: usize, value: String },
    #[error("line {line}: invalid location line \"{value}\"")]
    InvalidLine { line: usize, value: String },
}

impl ParseError {
    /// 1-based line the error was detected on, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MissingRoot => None,
            ParseError::Xml { line, .. }
            | ParseError::UnexpectedRoot { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::MissingContextName { line }
            | ParseError::MissingSource { line }
            | ParseError::InvalidStatus { line, .. }
            | ParseError::InvalidLine { line, .. } => Some(*line),
        }
    }
}

/// Line numbers of the parsed elements, indexed like the catalog.
///
/// `contexts[i]` is the line of the i-th context's `<name>`,
/// `messages[i][j]` the line of the j-th message's `<source>` in that context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    pub contexts: Vec<usize>,
    pub messages: Vec<Vec<usize>>,
    /// Line of the `<TS>` start tag.
    pub root: usize,
}

impl SourceMap {
    pub fn context_line(&self, context: usize) -> usize {
        self.contexts.get(context).copied().unwrap_or(self.root)
    }

    pub fn message_line(&self, context: usize, message: usize) -> usize {
        self.messages
            .get(context)
            .and_then(|lines| lines.get(message))
            .copied()
            .unwrap_or_else(|| self.context_line(context))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub source_map: SourceMap,
    /// First line holding content the model dropped. Writing such a catalog
    /// back would lose it.
    pub lossy_line: Option<usize>,
}

pub fn parse_file(path: &Path) -> Result<ParsedCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read TS file: {}", path.display()))?;
    parse_str(&content).with_context(|| format!("Failed to parse TS file: {}", path.display()))
}

pub fn parse_str(content: &str) -> Result<ParsedCatalog, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    CatalogParser::new(content).parse()
}

struct CatalogParser<'a> {
    reader: Reader<&'a [u8]>,
    content: &'a str,
    line_index: Vec<usize>,
    /// Byte offset where the last event returned by `next_event` starts.
    event_start: usize,
    lossy_line: Option<usize>,
}

impl<'a> CatalogParser<'a> {
    fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            content,
            line_index: build_line_index(content),
            event_start: 0,
            lossy_line: None,
        }
    }

    fn mark_lossy(&mut self) {
        if self.lossy_line.is_none() {
            self.lossy_line = Some(offset_to_line(&self.line_index, self.event_start));
        }
    }

    /// Handle an event between elements: whitespace is layout, anything
    /// else (comments, stray text) cannot be written back.
    fn between_elements(&mut self, event: &Event<'_>) {
        match event {
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {}
            Event::Text(_) | Event::CData(_) | Event::Comment(_) | Event::PI(_) => {
                self.mark_lossy()
            }
            _ => {}
        }
    }

    /// Raw XML of the element that `start` opened, up to its end tag.
    fn raw_element(&mut self, start: &BytesStart<'_>) -> Result<String, ParseError> {
        let begin = self.event_start;
        self.skip(start)?;
        Ok(self.raw_since(begin))
    }

    /// Raw XML from `begin` to the end of the last event read.
    fn raw_since(&self, begin: usize) -> String {
        let end = self.reader.buffer_position() as usize;
        self.content.get(begin..end).unwrap_or_default().to_string()
    }

    fn line(&self) -> usize {
        offset_to_line(&self.line_index, self.reader.buffer_position() as usize)
    }

    fn xml_error(&self, source: quick_xml::Error) -> ParseError {
        ParseError::Xml {
            line: offset_to_line(&self.line_index, self.reader.error_position() as usize),
            source,
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, ParseError> {
        self.event_start = self.reader.buffer_position() as usize;
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(source) => Err(self.xml_error(source)),
        }
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> Result<(), ParseError> {
        match self.reader.read_to_end(start.name()) {
            Ok(_) => Ok(()),
            Err(source) => Err(self.xml_error(source)),
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, ParseError> {
        for attr in start.attributes() {
            let attr = attr.map_err(|err| self.xml_error(err.into()))?;
            if attr.key.as_ref() == key {
                let value = attr.unescape_value().map_err(|err| self.xml_error(err))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn parse(mut self) -> Result<ParsedCatalog, ParseError> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"TS" => {
                    let mut parsed = self.parse_root(&e)?;
                    self.parse_contexts(&mut parsed)?;
                    parsed.lossy_line = self.lossy_line;
                    return Ok(parsed);
                }
                Event::Empty(e) if e.name().as_ref() == b"TS" => {
                    let mut parsed = self.parse_root(&e)?;
                    parsed.lossy_line = self.lossy_line;
                    return Ok(parsed);
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::UnexpectedRoot {
                        line: self.line(),
                        found: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    });
                }
                Event::Eof => return Err(ParseError::MissingRoot),
                // The writer emits its own declaration and doctype.
                Event::Decl(_) | Event::DocType(_) => {}
                event => self.between_elements(&event),
            }
        }
    }

    fn parse_root(&self, start: &BytesStart<'_>) -> Result<ParsedCatalog, ParseError> {
        let catalog = Catalog {
            version: self.attribute(start, b"version")?,
            language: self.attribute(start, b"language")?,
            source_language: self.attribute(start, b"sourcelanguage")?,
            ..Catalog::default()
        };
        Ok(ParsedCatalog {
            catalog,
            source_map: SourceMap {
                root: self.line(),
                ..SourceMap::default()
            },
            lossy_line: None,
        })
    }

    fn parse_contexts(&mut self, parsed: &mut ParsedCatalog) -> Result<(), ParseError> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"context" => {
                    let (context, name_line, message_lines) = self.parse_context()?;
                    parsed.catalog.contexts.push(context);
                    parsed.source_map.contexts.push(name_line);
                    parsed.source_map.messages.push(message_lines);
                }
                Event::Empty(e) if e.name().as_ref() == b"context" => {
                    return Err(ParseError::MissingContextName { line: self.line() });
                }
                Event::Start(e) => {
                    let raw = self.raw_element(&e)?;
                    parsed.catalog.extra_elements.push(raw);
                }
                Event::Empty(_) => {
                    let raw = self.raw_since(self.event_start);
                    parsed.catalog.extra_elements.push(raw);
                }
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        line: self.line(),
                        element: "TS",
                    });
                }
                event => self.between_elements(&event),
            }
        }
    }

    fn parse_context(&mut self) -> Result<(Context, usize, Vec<usize>), ParseError> {
        let start_line = self.line();
        let mut name: Option<(String, usize)> = None;
        let mut context = Context::default();
        let mut message_lines = Vec::new();

        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => {
                        let line = self.line();
                        name = Some((self.read_text("name")?, line));
                    }
                    b"comment" => context.comment = Some(self.read_text("comment")?),
                    b"message" => {
                        let (message, line) = self.parse_message(&e)?;
                        context.messages.push(message);
                        message_lines.push(line);
                    }
                    _ => {
                        let raw = self.raw_element(&e)?;
                        context.extra_elements.push(raw);
                    }
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"name" => name = Some((String::new(), self.line())),
                    b"comment" => context.comment = Some(String::new()),
                    b"message" => return Err(ParseError::MissingSource { line: self.line() }),
                    _ => context.extra_elements.push(self.raw_since(self.event_start)),
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        line: self.line(),
                        element: "context",
                    });
                }
                event => self.between_elements(&event),
            }
        }

        let (name, name_line) = name.ok_or(ParseError::MissingContextName { line: start_line })?;
        context.name = name;
        Ok((context, name_line, message_lines))
    }

    fn parse_message(&mut self, start: &BytesStart<'_>) -> Result<(Message, usize), ParseError> {
        let start_line = self.line();
        let mut message = Message {
            id: self.attribute(start, b"id")?,
            numerus: self.attribute(start, b"numerus")?.as_deref() == Some("yes"),
            ..Message::default()
        };
        let mut source: Option<(String, usize)> = None;

        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"location" => {
                        message.locations.push(self.parse_location(&e)?);
                        self.skip(&e)?;
                    }
                    b"source" => {
                        let line = self.line();
                        source = Some((self.read_text("source")?, line));
                    }
                    b"oldsource" => message.old_source = Some(self.read_text("oldsource")?),
                    b"comment" => message.comment = Some(self.read_text("comment")?),
                    b"oldcomment" => message.old_comment = Some(self.read_text("oldcomment")?),
                    b"extracomment" => {
                        message.extra_comment = Some(self.read_text("extracomment")?)
                    }
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.read_text("translatorcomment")?)
                    }
                    b"translation" => {
                        message.translation = self.parse_translation(&e, message.numerus, false)?
                    }
                    _ => {
                        let raw = self.raw_element(&e)?;
                        message.extra_elements.push(raw);
                    }
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"location" => message.locations.push(self.parse_location(&e)?),
                    b"source" => source = Some((String::new(), self.line())),
                    b"oldsource" => message.old_source = Some(String::new()),
                    b"comment" => message.comment = Some(String::new()),
                    b"oldcomment" => message.old_comment = Some(String::new()),
                    b"extracomment" => message.extra_comment = Some(String::new()),
                    b"translatorcomment" => message.translator_comment = Some(String::new()),
                    b"translation" => {
                        message.translation = self.parse_translation(&e, message.numerus, true)?
                    }
                    _ => message.extra_elements.push(self.raw_since(self.event_start)),
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        line: self.line(),
                        element: "message",
                    });
                }
                event => self.between_elements(&event),
            }
        }

        let (source, source_line) = source.ok_or(ParseError::MissingSource { line: start_line })?;
        message.source = source;
        Ok((message, source_line))
    }

    fn parse_location(&self, start: &BytesStart<'_>) -> Result<Location, ParseError> {
        let line = match self.attribute(start, b"line")? {
            Some(value) => Some(parse_line_ref(&value).ok_or_else(|| ParseError::InvalidLine {
                line: self.line(),
                value,
            })?),
            None => None,
        };
        Ok(Location {
            filename: self.attribute(start, b"filename")?,
            line,
        })
    }

    fn parse_translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
        empty: bool,
    ) -> Result<Translation, ParseError> {
        let status = match self.attribute(start, b"type")? {
            Some(value) => {
                TranslationStatus::from_attribute(&value).ok_or_else(|| ParseError::InvalidStatus {
                    line: self.line(),
                    value,
                })?
            }
            None => TranslationStatus::Finished,
        };

        let variants = !numerus && self.attribute(start, b"variants")?.as_deref() == Some("yes");

        let forms = match (numerus, variants, empty) {
            (true, _, true) => TranslationForms::Numerus(Vec::new()),
            (false, true, true) => TranslationForms::Variants(Vec::new()),
            (false, false, true) => TranslationForms::Single(String::new()),
            (true, _, false) => TranslationForms::Numerus(self.read_forms(b"numerusform")?),
            (false, true, false) => TranslationForms::Variants(self.read_forms(b"lengthvariant")?),
            (false, false, false) => TranslationForms::Single(self.read_text("translation")?),
        };
        Ok(Translation { status, forms })
    }

    /// Read the `<numerusform>` or `<lengthvariant>` children of a translation.
    fn read_forms(&mut self, form: &[u8]) -> Result<Vec<String>, ParseError> {
        let mut forms = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == form => {
                    forms.push(self.read_text("translation")?);
                }
                Event::Empty(e) if e.name().as_ref() == form => forms.push(String::new()),
                Event::Start(e) => {
                    self.mark_lossy();
                    self.skip(&e)?;
                }
                Event::Empty(_) => self.mark_lossy(),
                Event::End(_) => return Ok(forms),
                Event::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        line: self.line(),
                        element: "translation",
                    });
                }
                event => self.between_elements(&event),
            }
        }
    }

    /// Collect character data up to the end tag of the current element.
    fn read_text(&mut self, element: &'static str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(e) => {
                    let unescaped = e.unescape().map_err(|err| self.xml_error(err))?;
                    text.push_str(&unescaped);
                }
                Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
                // lupdate encodes control characters as <byte value="x1b"/>.
                Event::Empty(e) if e.name().as_ref() == b"byte" => {
                    match self.attribute(&e, b"value")?.as_deref().and_then(parse_byte) {
                        Some(c) => text.push(c),
                        None => self.mark_lossy(),
                    }
                }
                // Length variants of plural forms and other nested markup.
                Event::Start(e) => {
                    self.mark_lossy();
                    self.skip(&e)?;
                }
                Event::Empty(_) | Event::Comment(_) | Event::PI(_) => self.mark_lossy(),
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        line: self.line(),
                        element,
                    });
                }
                _ => {}
            }
        }
    }
}

fn parse_line_ref(value: &str) -> Option<LineRef> {
    if value.starts_with(['+', '-']) {
        value.parse().ok().map(LineRef::Relative)
    } else {
        value.parse().ok().map(LineRef::Absolute)
    }
}

fn parse_byte(value: &str) -> Option<char> {
    let code = match value.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse().ok()?,
    };
    char::from_u32(code)
}
