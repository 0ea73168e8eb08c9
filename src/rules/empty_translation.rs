//! Finished messages with an empty translation.
//!
//! A missing translation must be declared with `type="unfinished"`. A
//! finished but empty translation makes the application show an empty
//! label instead of falling back to the source text.

use crate::{
    catalog::TranslationStatus, issues::EmptyTranslationIssue, workspace::LoadedCatalog,
};

pub fn check_empty_translations(catalog: &LoadedCatalog) -> Vec<EmptyTranslationIssue> {
    let mut issues = Vec::new();

    for (ci, context) in catalog.catalog.contexts.iter().enumerate() {
        for (mi, message) in context.messages.iter().enumerate() {
            if message.status() == TranslationStatus::Finished
                && message.translation.has_empty_form()
            {
                issues.push(EmptyTranslationIssue {
                    location: catalog.message_location(ci, mi),
                    source: message.source.clone(),
                });
            }
        }
    }

    issues
}
