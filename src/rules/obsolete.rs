use crate::{issues::ObsoleteIssue, workspace::LoadedCatalog};

/// Obsolete and vanished messages are kept by lupdate for reuse but never
/// loaded; report them so they can be cleaned up.
pub fn check_obsolete(catalog: &LoadedCatalog) -> Vec<ObsoleteIssue> {
    catalog
        .catalog
        .contexts
        .iter()
        .enumerate()
        .flat_map(|(ci, context)| {
            context
                .messages
                .iter()
                .enumerate()
                .filter(|(_, message)| message.status().is_stale())
                .map(move |(mi, message)| ObsoleteIssue {
                    location: catalog.message_location(ci, mi),
                    source: message.source.clone(),
                    status: message.status(),
                })
        })
        .collect()
}
