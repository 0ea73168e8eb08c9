//! Properties of the reader and writer on a catalog produced by lupdate.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use tsctl::catalog::{self, Catalog, TranslationForms, TranslationStatus};

const RP_PT_BR: &str = include_str!("../fixtures/terralib_mod_qt_plugins_rp_pt_br.ts");

fn rp() -> Catalog {
    catalog::parse_str(RP_PT_BR).unwrap().catalog
}

#[test]
fn test_reads_whole_document() {
    let catalog = rp();

    assert_eq!(catalog.version.as_deref(), Some("2.1"));
    assert_eq!(catalog.language.as_deref(), Some("pt_BR"));
    assert_eq!(catalog.source_language, None);
    assert_eq!(catalog.contexts.len(), 15);
    assert_eq!(catalog.message_count(), 28);
    assert_eq!(catalog.location_count(), 34);

    let stats = catalog.stats();
    assert_eq!(stats.finished, 22);
    assert_eq!(stats.unfinished, 6);
    assert_eq!(stats.obsolete + stats.vanished, 0);
}

#[test]
fn test_lupdate_output_is_fully_preserved() {
    let parsed = catalog::parse_str(RP_PT_BR).unwrap();
    assert_eq!(parsed.lossy_line, None);
    assert!(parsed.catalog.extra_elements.is_empty());
}

#[test]
fn test_non_ascii_text_survives() {
    let catalog = rp();
    let fusion = catalog
        .context("te::qt::plugins::rp::FusionAction")
        .unwrap();
    assert_eq!(fusion.messages[0].translation.text(), "Fusão...");
}

#[test]
fn test_writer_reproduces_lupdate_output() {
    assert_eq!(catalog::to_string(&rp()), RP_PT_BR);
}

#[test]
fn test_source_texts_survive_round_trip() {
    let original = rp();
    let reparsed = catalog::parse_str(&catalog::to_string(&original))
        .unwrap()
        .catalog;

    let sources = |c: &Catalog| -> Vec<(String, String)> {
        c.messages()
            .map(|(ctx, msg)| (ctx.name.clone(), msg.source.clone()))
            .collect()
    };
    assert_eq!(sources(&reparsed), sources(&original));
    assert_eq!(reparsed, original);
}

#[test]
fn test_context_names_are_unique() {
    let catalog = rp();
    let names: HashSet<&str> = catalog.contexts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), catalog.contexts.len());
}

#[test]
fn test_unfinished_translations_are_empty_or_draft() {
    let catalog = rp();
    let drafts: Vec<&str> = catalog
        .messages()
        .map(|(_, msg)| msg)
        .filter(|msg| msg.status() == TranslationStatus::Unfinished)
        .map(|msg| match &msg.translation.forms {
            TranslationForms::Single(text) => text.as_str(),
            TranslationForms::Numerus(_) | TranslationForms::Variants(_) => {
                panic!("no plural or variant messages in this catalog")
            }
        })
        .collect();

    assert_eq!(drafts.len(), 6);
    assert_eq!(drafts.iter().filter(|d| d.is_empty()).count(), 4);
    assert!(drafts.contains(&"Aviso"));
}

#[test]
fn test_strip_changes_only_locations() {
    let original = rp();
    let mut stripped = original.clone();

    assert_eq!(stripped.strip_locations(), 34);

    for ((ctx_a, msg_a), (ctx_b, msg_b)) in original.messages().zip(stripped.messages()) {
        assert_eq!(ctx_a.name, ctx_b.name);
        assert_eq!(msg_a.source, msg_b.source);
        assert_eq!(msg_a.translation, msg_b.translation);
        assert!(msg_b.locations.is_empty());
    }
    assert_eq!(stripped.message_count(), original.message_count());
}
