//! Unfinished message detection.
//!
//! An unfinished message keeps either an empty translation or a draft
//! placeholder. Either way the runtime falls back to the source text, so
//! these are warnings, not errors.

use crate::{catalog::TranslationStatus, issues::UnfinishedIssue, workspace::LoadedCatalog};

pub fn check_unfinished(catalog: &LoadedCatalog) -> Vec<UnfinishedIssue> {
    let mut issues = Vec::new();

    for (ci, context) in catalog.catalog.contexts.iter().enumerate() {
        for (mi, message) in context.messages.iter().enumerate() {
            if message.status() != TranslationStatus::Unfinished {
                continue;
            }
            let draft = message.translation.text();
            issues.push(UnfinishedIssue {
                location: catalog.message_location(ci, mi),
                source: message.source.clone(),
                placeholder: (!draft.is_empty()).then(|| draft.to_string()),
            });
        }
    }

    issues
}
