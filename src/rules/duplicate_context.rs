//! Duplicate context detection.
//!
//! Context names must be unique within a document. lupdate never produces
//! duplicates, but hand merges of two catalogs often do, and the runtime
//! loader silently keeps only one of them.

use std::collections::HashMap;

use crate::{issues::DuplicateContextIssue, workspace::LoadedCatalog};

pub fn check_duplicate_contexts(catalog: &LoadedCatalog) -> Vec<DuplicateContextIssue> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut issues = Vec::new();

    for (index, context) in catalog.catalog.contexts.iter().enumerate() {
        let line = catalog.source_map.context_line(index);
        match first_seen.get(context.name.as_str()) {
            Some(&first_line) => issues.push(DuplicateContextIssue {
                location: catalog.context_location(index),
                name: context.name.clone(),
                first_line,
            }),
            None => {
                first_seen.insert(&context.name, line);
            }
        }
    }

    issues
}
