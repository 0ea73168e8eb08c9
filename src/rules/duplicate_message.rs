//! Duplicate message detection.
//!
//! Within one context a message is identified by its source text plus its
//! disambiguation comment. The same source may appear at several call
//! sites, but those are recorded as extra `<location>` hints on a single
//! message, never as a second message.

use std::collections::HashMap;

use crate::{issues::DuplicateMessageIssue, workspace::LoadedCatalog};

pub fn check_duplicate_messages(catalog: &LoadedCatalog) -> Vec<DuplicateMessageIssue> {
    let mut issues = Vec::new();

    for (ci, context) in catalog.catalog.contexts.iter().enumerate() {
        let mut first_seen: HashMap<(&str, &str), usize> = HashMap::new();

        for (mi, message) in context.messages.iter().enumerate() {
            // Obsolete entries legitimately shadow a live message with the same text.
            if message.status().is_stale() {
                continue;
            }
            match first_seen.get(&message.key()) {
                Some(&first_line) => issues.push(DuplicateMessageIssue {
                    location: catalog.message_location(ci, mi),
                    source: message.source.clone(),
                    comment: message.comment.clone().filter(|c| !c.is_empty()),
                    first_line,
                }),
                None => {
                    first_seen.insert(message.key(), catalog.source_map.message_line(ci, mi));
                }
            }
        }
    }

    issues
}
