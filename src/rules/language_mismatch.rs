use crate::{issues::LanguageMismatchIssue, workspace::LoadedCatalog};

/// Compare the catalog's `language` attribute with the configured one.
///
/// Qt accepts both `pt_BR` and `pt-BR`, so the separator is not significant.
pub fn check_language(catalog: &LoadedCatalog, expected: &str) -> Option<LanguageMismatchIssue> {
    let found = catalog.catalog.language.as_deref();
    if found.is_some_and(|found| normalize(found) == normalize(expected)) {
        return None;
    }
    Some(LanguageMismatchIssue {
        location: catalog.location(catalog.source_map.root),
        expected: expected.to_string(),
        found: found.map(str::to_string),
    })
}

fn normalize(language: &str) -> String {
    language.replace('-', "_").to_ascii_lowercase()
}
