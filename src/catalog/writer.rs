//! Serialize a [`Catalog`] in the layout lupdate produces.
//!
//! Contexts start at column 0, messages are indented by 4 spaces, message
//! children by 8 and numerus forms by 12. An unfinished empty translation is
//! written `<translation type="unfinished"></translation>`, never
//! self-closed, because that is what the extraction tool emits and what
//! translators diff against.
//!
//! Control characters are not allowed in XML 1.0 text; they are written as
//! `<byte value="xNN"/>`, which the reader decodes again.
//!
//! Unmodeled elements kept by the reader are written back verbatim: root
//! extras before the first context, context extras after its comment, and
//! message extras after the translation.

use std::{borrow::Cow, fs, path::Path};

use anyhow::{Context as _, Result};
use quick_xml::escape::escape;

use super::{Catalog, Context, Location, Message, Translation, TranslationForms};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const DOCTYPE: &str = "<!DOCTYPE TS>";

pub fn to_string(catalog: &Catalog) -> String {
    let mut out = XmlOut::default();
    out.line(0, XML_DECLARATION);
    out.line(0, DOCTYPE);

    let mut root = String::from("<TS");
    push_attr(&mut root, "version", catalog.version.as_deref());
    push_attr(&mut root, "language", catalog.language.as_deref());
    push_attr(&mut root, "sourcelanguage", catalog.source_language.as_deref());
    root.push('>');
    out.line(0, &root);

    for raw in &catalog.extra_elements {
        out.line(0, raw);
    }

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.line(0, "</TS>");
    out.buf
}

pub fn write_file(path: &Path, catalog: &Catalog) -> Result<()> {
    fs::write(path, to_string(catalog))
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[derive(Default)]
struct XmlOut {
    buf: String,
}

impl XmlOut {
    fn line(&mut self, indent: usize, content: &str) {
        for _ in 0..indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(content);
        self.buf.push('\n');
    }

    fn element(&mut self, indent: usize, tag: &str, text: &str) {
        let line = format!("<{tag}>{}</{tag}>", escape_text(text));
        self.line(indent, &line);
    }

    fn optional_element(&mut self, indent: usize, tag: &str, text: Option<&str>) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.element(indent, tag, text);
        }
    }
}

/// C0 controls other than tab, newline and carriage return.
fn is_restricted(c: char) -> bool {
    c < ' ' && !matches!(c, '\t' | '\n' | '\r')
}

/// Escape character data the way lupdate does.
fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(is_restricted) {
        return escape(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    while let Some(pos) = rest.find(is_restricted) {
        out.push_str(&escape(&rest[..pos]));
        out.push_str(&format!("<byte value=\"x{:x}\"/>", rest.as_bytes()[pos]));
        rest = &rest[pos + 1..];
    }
    out.push_str(&escape(rest));
    Cow::Owned(out)
}

fn push_attr(tag: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        tag.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
}

fn write_context(out: &mut XmlOut, context: &Context) {
    out.line(0, "<context>");
    out.element(1, "name", &context.name);
    out.optional_element(1, "comment", context.comment.as_deref());
    for raw in &context.extra_elements {
        out.line(1, raw);
    }
    for message in &context.messages {
        write_message(out, message);
    }
    out.line(0, "</context>");
}

fn write_message(out: &mut XmlOut, message: &Message) {
    let mut open = String::from("<message");
    push_attr(&mut open, "id", message.id.as_deref());
    if message.numerus {
        push_attr(&mut open, "numerus", Some("yes"));
    }
    open.push('>');
    out.line(1, &open);

    for location in &message.locations {
        out.line(2, &location_tag(location));
    }
    out.element(2, "source", &message.source);
    out.optional_element(2, "oldsource", message.old_source.as_deref());
    out.optional_element(2, "comment", message.comment.as_deref());
    out.optional_element(2, "oldcomment", message.old_comment.as_deref());
    out.optional_element(2, "extracomment", message.extra_comment.as_deref());
    out.optional_element(2, "translatorcomment", message.translator_comment.as_deref());
    write_translation(out, &message.translation);
    for raw in &message.extra_elements {
        out.line(2, raw);
    }

    out.line(1, "</message>");
}

fn location_tag(location: &Location) -> String {
    let mut tag = String::from("<location");
    push_attr(&mut tag, "filename", location.filename.as_deref());
    if let Some(line) = location.line {
        push_attr(&mut tag, "line", Some(&line.to_string()));
    }
    tag.push_str("/>");
    tag
}

fn write_translation(out: &mut XmlOut, translation: &Translation) {
    let mut open = String::from("<translation");
    push_attr(&mut open, "type", translation.status.attribute());
    if matches!(translation.forms, TranslationForms::Variants(_)) {
        push_attr(&mut open, "variants", Some("yes"));
    }
    open.push('>');

    let (tag, forms) = match &translation.forms {
        TranslationForms::Single(text) => {
            out.line(2, &format!("{}{}</translation>", open, escape_text(text)));
            return;
        }
        TranslationForms::Numerus(forms) => ("numerusform", forms),
        TranslationForms::Variants(forms) => ("lengthvariant", forms),
    };
    out.line(2, &open);
    for form in forms {
        out.element(3, tag, form);
    }
    out.line(2, "</translation>");
}
