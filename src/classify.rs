//! Question classification.
//!
//! Total, pure functions over arbitrary input: keyword ladders over the
//! static language map, product table, and fixed term lists. First match
//! wins; anything unmatched is `General`.

use crate::catalog::data::{LANGUAGES, LanguageInfo, PRODUCTS, ProductRecord};

const TECHNICAL_TERMS: &[&str] = &[
    "how to",
    "implement",
    "configure",
    "setup",
    "install",
    "deploy",
    "documentation",
    "guide",
    "tutorial",
    "example",
    "requirement",
];

const INTEGRATION_TERMS: &[&str] = &[
    "integrate",
    "connection",
    "workflow",
    "pipeline",
    "devops",
    "jenkins",
    "github",
    "gitlab",
    "ci/cd",
    "automation",
];

const PRODUCT_QUERY_TERMS: &[&str] = &[
    "product",
    "what is",
    "tell me about",
    "how many",
    "list",
    "show me",
];

const PRODUCT_LIST_TERMS: &[&str] = &[
    "list products",
    "show products",
    "what products",
    "which products",
];

const COMPARISON_TERMS: &[&str] = &["compare", "difference between", "vs", "versus"];

/// Routing category of a question, in ladder priority order.
#[derive(Clone, Copy, Debug)]
pub enum QuestionCategory {
    /// A locale keyword appeared; answer from the locale site.
    Language { language: &'static LanguageInfo },
    /// A catalog product name appeared verbatim.
    ProductSpecific { product: &'static ProductRecord },
    /// How-to / setup / documentation phrasing.
    Technical,
    /// Integration and pipeline phrasing.
    Integration,
    /// Everything else.
    General,
}

/// Classify a question. Case-insensitive substring ladder: language
/// keywords, then product names, then technical terms, then integration
/// terms; empty or unmatched input is `General`.
pub fn classify(question: &str) -> QuestionCategory {
    let lower = question.to_lowercase();

    if let Some(language) = LANGUAGES.iter().find(|info| lower.contains(info.keyword)) {
        return QuestionCategory::Language { language };
    }

    if let Some(product) = PRODUCTS
        .iter()
        .find(|record| lower.contains(&record.name.to_lowercase()))
    {
        return QuestionCategory::ProductSpecific { product };
    }

    if TECHNICAL_TERMS.iter().any(|term| lower.contains(term)) {
        return QuestionCategory::Technical;
    }

    if INTEGRATION_TERMS.iter().any(|term| lower.contains(term)) {
        return QuestionCategory::Integration;
    }

    QuestionCategory::General
}

/// Lowercase, drop `.,!?`, and remove hyphens and whitespace. Makes
/// "arcad skipper", "ARCAD-Skipper", and "arcadskipper" compare equal.
pub fn normalize_compact(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?') && *c != '-' && !c.is_whitespace())
        .collect()
}

fn contains_compact_term(question: &str, terms: &[&str]) -> bool {
    let normalized = normalize_compact(question);
    terms
        .iter()
        .any(|term| normalized.contains(&normalize_compact(term)))
}

/// The question asks about products in general terms.
pub fn is_product_query(question: &str) -> bool {
    contains_compact_term(question, PRODUCT_QUERY_TERMS)
}

/// The question asks for the product list.
pub fn is_listing_query(question: &str) -> bool {
    contains_compact_term(question, PRODUCT_LIST_TERMS)
}

/// The question asks for a product comparison.
pub fn is_comparison_query(question: &str) -> bool {
    contains_compact_term(question, COMPARISON_TERMS)
}

/// The question asks how many products exist.
pub fn is_count_query(question: &str) -> bool {
    contains_compact_term(question, &["how many"])
}

/// Catalog products mentioned in the question, hyphen/space-insensitive,
/// ordered by first occurrence in the question text.
pub fn mentioned_products(question: &str) -> Vec<&'static ProductRecord> {
    let normalized = normalize_compact(question);
    let mut hits: Vec<(usize, &'static ProductRecord)> = PRODUCTS
        .iter()
        .filter_map(|record| {
            normalized
                .find(&normalize_compact(record.name))
                .map(|pos| (pos, record))
        })
        .collect();
    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_general() {
        assert!(matches!(classify(""), QuestionCategory::General));
        assert!(matches!(classify("   "), QuestionCategory::General));
    }

    #[test]
    fn language_outranks_product_and_technical() {
        let category = classify("How to install ARCAD-Skipper for our French team?");
        match category {
            QuestionCategory::Language { language } => assert_eq!(language.name, "French"),
            other => panic!("expected language category, got {other:?}"),
        }
    }

    #[test]
    fn language_misspellings_are_recognized() {
        for (question, name) in [
            ("do you support frace", "French"),
            ("any partners in idnia", "India"),
            ("switch to neng please", "English"),
        ] {
            match classify(question) {
                QuestionCategory::Language { language } => assert_eq!(language.name, name),
                other => panic!("{question:?} classified as {other:?}"),
            }
        }
    }

    #[test]
    fn product_name_wins_over_technical_terms() {
        match classify("ARCAD-Observer documentation please") {
            QuestionCategory::ProductSpecific { product } => {
                assert_eq!(product.name, "ARCAD-Observer");
            }
            other => panic!("expected product category, got {other:?}"),
        }
    }

    #[test]
    fn technical_then_integration_then_general() {
        assert!(matches!(
            classify("how to deploy a build"),
            QuestionCategory::Technical
        ));
        assert!(matches!(
            classify("does it work in a jenkins pipeline"),
            QuestionCategory::Integration
        ));
        assert!(matches!(
            classify("what's new this year?"),
            QuestionCategory::General
        ));
    }

    #[test]
    fn classify_is_stable_across_repeated_calls() {
        let question = "Compare ARCAD-Skipper and ARCAD-Observer";
        for _ in 0..3 {
            assert!(matches!(
                classify(question),
                QuestionCategory::ProductSpecific { .. }
            ));
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = ["ARCAD-Skipper!", "  arcad skipper  ", "What is ARCAD iUnit?"];
        for input in inputs {
            let once = normalize_compact(input);
            assert_eq!(once, normalize_compact(&once));
        }
    }

    #[test]
    fn mentioned_products_ignore_hyphens_and_spacing() {
        let products = mentioned_products("tell me about arcad skipper");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "ARCAD-Skipper");
    }

    #[test]
    fn mentioned_products_keep_first_occurrence_order() {
        let products = mentioned_products("ARCAD-Observer versus ARCAD-Skipper");
        let names: Vec<_> = products.iter().map(|p| p.name).collect();
        assert_eq!(names, ["ARCAD-Observer", "ARCAD-Skipper"]);
    }

    #[test]
    fn query_term_detection_spans_spacing() {
        assert!(is_product_query("What is ARCAD?"));
        assert!(is_count_query("How   many products do you have?"));
        assert!(is_listing_query("show products"));
        assert!(is_comparison_query("skipper vs observer"));
        assert!(!is_comparison_query("I love conversations"));
    }
}
