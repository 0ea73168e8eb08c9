//! Detection rules for catalog issues.
//!
//! Each rule is a plain function over one [`LoadedCatalog`]. Rules never
//! mutate the catalog; fixes live in the `clean`, `strip` and `fmt`
//! commands.

pub mod duplicate_context;
pub mod duplicate_message;
pub mod empty_translation;
pub mod language_mismatch;
pub mod obsolete;
pub mod unfinished;
pub mod untranslated;

use crate::{config::Config, issues::Issue, issues::Rule, workspace::LoadedCatalog};

use self::{
    duplicate_context::check_duplicate_contexts, duplicate_message::check_duplicate_messages,
    empty_translation::check_empty_translations, language_mismatch::check_language,
    obsolete::check_obsolete, unfinished::check_unfinished, untranslated::check_untranslated,
};

/// Run the given rules over one catalog.
///
/// Rules disabled in the config are skipped even when requested.
pub fn run_rules(catalog: &LoadedCatalog, rules: &[Rule], config: &Config) -> Vec<Issue> {
    let mut issues = Vec::new();

    for &rule in rules {
        if !config.is_rule_enabled(rule) {
            continue;
        }
        match rule {
            Rule::DuplicateContext => issues.extend(
                check_duplicate_contexts(catalog)
                    .into_iter()
                    .map(Issue::DuplicateContext),
            ),
            Rule::DuplicateMessage => issues.extend(
                check_duplicate_messages(catalog)
                    .into_iter()
                    .map(Issue::DuplicateMessage),
            ),
            Rule::EmptyTranslation => issues.extend(
                check_empty_translations(catalog)
                    .into_iter()
                    .map(Issue::EmptyTranslation),
            ),
            Rule::Unfinished => {
                issues.extend(check_unfinished(catalog).into_iter().map(Issue::Unfinished))
            }
            Rule::Untranslated => issues.extend(
                check_untranslated(catalog)
                    .into_iter()
                    .map(Issue::Untranslated),
            ),
            Rule::Obsolete => {
                issues.extend(check_obsolete(catalog).into_iter().map(Issue::Obsolete))
            }
            Rule::LanguageMismatch => {
                if let Some(expected) = &config.language {
                    issues.extend(
                        check_language(catalog, expected)
                            .into_iter()
                            .map(Issue::LanguageMismatch),
                    );
                }
            }
            // Produced while loading, not by a rule.
            Rule::ParseError => {}
        }
    }

    issues
}
