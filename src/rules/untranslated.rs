//! Untranslated value detection rule.
//!
//! Detects finished translations that are identical to their source text,
//! which may indicate that the text was copied over rather than translated.
//! Sources without any alphabetic character ("...", "%1") are skipped since
//! they are legitimately identical in every language.

use crate::{
    catalog::TranslationStatus, issues::UntranslatedIssue, utils::contains_alphabetic,
    workspace::LoadedCatalog,
};

pub fn check_untranslated(catalog: &LoadedCatalog) -> Vec<UntranslatedIssue> {
    let mut issues = Vec::new();

    for (ci, context) in catalog.catalog.contexts.iter().enumerate() {
        for (mi, message) in context.messages.iter().enumerate() {
            if message.status() != TranslationStatus::Finished
                || message.numerus
                || !contains_alphabetic(&message.source)
            {
                continue;
            }
            if message.translation.text() == message.source {
                issues.push(UntranslatedIssue {
                    location: catalog.message_location(ci, mi),
                    source: message.source.clone(),
                });
            }
        }
    }

    issues
}
