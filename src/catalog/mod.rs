//! Product catalog: static data, lookups, and local query answering.
//!
//! Catalog questions that the static table can answer (details, comparisons,
//! listings) are handled here without any network or model involvement.
//! [`answer_catalog_query`] returns `None` when the question needs the
//! retrieval-augmented path instead.

pub mod data;
mod render;

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::classify::{
    self, is_comparison_query, is_count_query, is_listing_query, is_product_query,
    normalize_compact,
};
use data::{LANGUAGES, LanguageInfo, PRODUCTS, ProductRecord};

/// Product families in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    DevOps,
    Modernization,
    Testing,
    Security,
    Integration,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductCategory::DevOps => "DevOps",
            ProductCategory::Modernization => "Modernization",
            ProductCategory::Testing => "Testing",
            ProductCategory::Security => "Security",
            ProductCategory::Integration => "Integration",
        };
        f.write_str(name)
    }
}

/// The full product table, in catalog order.
pub fn all() -> &'static [ProductRecord] {
    PRODUCTS
}

static NAME_INDEX: Lazy<FxHashMap<String, &'static ProductRecord>> = Lazy::new(|| {
    PRODUCTS
        .iter()
        .map(|record| (normalize_compact(record.name), record))
        .collect()
});

/// Look up a product by name, tolerant of hyphen/space/case differences.
pub fn find(name: &str) -> Option<&'static ProductRecord> {
    NAME_INDEX.get(&normalize_compact(name)).copied()
}

/// Look up a locale entry by its exact keyword.
pub fn language_info(keyword: &str) -> Option<&'static LanguageInfo> {
    let keyword = keyword.to_lowercase();
    LANGUAGES.iter().find(|info| info.keyword == keyword)
}

/// Answer a catalog question from the static table, if it can be answered
/// locally. Comparison beats detail beats overview; returns `None` when the
/// question should go to the retrieval-augmented path.
pub fn answer_catalog_query(question: &str) -> Option<String> {
    let products = classify::mentioned_products(question);

    if is_comparison_query(question) && products.len() >= 2 {
        return Some(render::comparison(products[0], products[1]));
    }

    if is_product_query(question) && !products.is_empty() {
        let details: String = products.iter().map(|p| render::detail(p)).collect();
        return Some(details);
    }

    if (is_listing_query(question) || is_count_query(question)) && products.is_empty() {
        return Some(render::overview());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_spacing_insensitive() {
        assert_eq!(find("arcad skipper").unwrap().name, "ARCAD-Skipper");
        assert_eq!(find("ARCAD-SKIPPER").unwrap().name, "ARCAD-Skipper");
        assert_eq!(find("arcadiunit").unwrap().name, "ARCAD iUnit");
        assert!(find("arcad nonexistent").is_none());
    }

    #[test]
    fn language_lookup_covers_misspellings() {
        assert_eq!(language_info("frace").unwrap().name, "French");
        assert_eq!(language_info("JAPANESE").unwrap().name, "Japanese");
        assert!(language_info("klingon").is_none());
    }

    #[test]
    fn detail_query_answers_locally() {
        let answer = answer_catalog_query("Tell me about ARCAD-Skipper").unwrap();
        assert!(answer.contains("**ARCAD-Skipper**"));
        assert!(answer.contains("Application analysis and documentation tool"));
        assert!(answer.contains("https://www.arcadsoftware.com/products/arcad-skipper/"));
    }

    #[test]
    fn comparison_uses_first_two_mentioned() {
        let answer =
            answer_catalog_query("Compare ARCAD-Observer and ARCAD-Skipper please").unwrap();
        let observer = answer.find("**ARCAD-Observer**").unwrap();
        let skipper = answer.find("**ARCAD-Skipper**").unwrap();
        assert!(observer < skipper);
        assert!(answer.contains("Modernization"));
        assert!(answer.contains("DevOps"));
    }

    #[test]
    fn listing_and_count_fall_back_to_overview() {
        let listing = answer_catalog_query("Which products do you offer?").unwrap();
        let count = answer_catalog_query("How many products does ARCAD have?").unwrap();
        assert!(listing.contains("11 powerful products"));
        assert!(count.contains("11 powerful products"));
    }

    #[test]
    fn non_catalog_questions_are_deferred() {
        assert!(answer_catalog_query("What's new this year?").is_none());
        assert!(answer_catalog_query("").is_none());
    }
}
