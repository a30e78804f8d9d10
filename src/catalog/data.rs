//! Static catalog data: the product table and the language/locale map.
//!
//! Compiled-in and read-only. Lookup order matters for the language map
//! (substring match, first hit wins) so entries keep their declaration order,
//! including the common misspellings observed in real questions.

use super::ProductCategory;

/// Platform and integration notes for a product.
#[derive(Clone, Copy, Debug)]
pub struct TechnicalDetails {
    pub platforms: &'static [&'static str],
    pub integrations: &'static [&'static str],
}

/// One entry of the compiled product catalog.
#[derive(Clone, Copy, Debug)]
pub struct ProductRecord {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    pub category: ProductCategory,
    pub key_features: &'static [&'static str],
    pub related_products: &'static [&'static str],
    pub technical_details: Option<TechnicalDetails>,
}

/// The product table, in catalog order.
pub const PRODUCTS: &[ProductRecord] = &[
    ProductRecord {
        name: "ARCAD-Skipper",
        url: "https://www.arcadsoftware.com/products/arcad-skipper/",
        description: "Application analysis and documentation tool for IBM i modernization",
        category: ProductCategory::Modernization,
        key_features: &[
            "Cross-reference database for IBM i applications",
            "Impact analysis for code changes",
            "Automated documentation generation",
            "Code quality metrics and analysis",
            "Integration with DevOps tools",
        ],
        related_products: &["ARCAD-Observer", "ARCAD-Transformer"],
        technical_details: Some(TechnicalDetails {
            platforms: &["IBM i"],
            integrations: &["Git", "Jenkins", "ARCAD-Observer"],
        }),
    },
    ProductRecord {
        name: "ARCAD-Observer",
        url: "https://www.arcadsoftware.com/products/arcad-observer/",
        description: "Real-time application monitoring and performance analysis",
        category: ProductCategory::DevOps,
        key_features: &[
            "Real-time application monitoring",
            "Performance metrics tracking",
            "Resource usage analysis",
            "Bottleneck identification",
            "Integration with CI/CD pipelines",
        ],
        related_products: &["ARCAD-Skipper", "ARCAD-Deliver"],
        technical_details: Some(TechnicalDetails {
            platforms: &["IBM i"],
            integrations: &["Jenkins", "Grafana", "ELK Stack"],
        }),
    },
    ProductRecord {
        name: "ARCAD-Verifier",
        url: "https://www.arcadsoftware.com/products/arcad-verifier/",
        description: "Quality assurance and testing solution for IBM i applications",
        category: ProductCategory::Testing,
        key_features: &[
            "Automated testing capabilities",
            "Test coverage analysis",
            "Regression testing",
            "Integration with CI/CD pipelines",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD-Transformer",
        url: "https://www.arcadsoftware.com/products/arcad-transformer/",
        description: "Comprehensive modernization suite for IBM i applications",
        category: ProductCategory::Modernization,
        key_features: &[
            "RPG code conversion",
            "Database modernization",
            "User interface modernization",
            "Code refactoring tools",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD-Listener",
        url: "https://www.arcadsoftware.com/products/arcad-listener/",
        description: "Real-time change tracking and version control for IBM i",
        category: ProductCategory::DevOps,
        key_features: &[
            "Source code change monitoring",
            "Git integration",
            "Version control management",
            "Change history tracking",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD-CodeChecker",
        url: "https://www.arcadsoftware.com/products/arcad-codechecker/",
        description: "Code quality and standards enforcement tool",
        category: ProductCategory::DevOps,
        key_features: &[
            "Code quality analysis",
            "Coding standards enforcement",
            "Automated code reviews",
            "Quality metrics reporting",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD-API",
        url: "https://www.arcadsoftware.com/products/arcad-api/",
        description: "API management and development solution",
        category: ProductCategory::Integration,
        key_features: &[
            "API creation and management",
            "REST API development",
            "API documentation",
            "Integration capabilities",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD-Builder",
        url: "https://www.arcadsoftware.com/products/arcad-builder/",
        description: "Build and deployment automation for IBM i",
        category: ProductCategory::DevOps,
        key_features: &[
            "Automated builds",
            "Deployment automation",
            "Build pipeline integration",
            "Version management",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD iUnit",
        url: "https://www.arcadsoftware.com/arcad/products/arcad-iunit-ibm-i-unit-testing/",
        description: "Unit testing framework for IBM i applications",
        category: ProductCategory::Testing,
        key_features: &[
            "Automated unit testing",
            "Test case management",
            "Test coverage analysis",
            "Integration with CI/CD",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "ARCAD Transformer DB",
        url: "https://www.arcadsoftware.com/arcad/products/arcad-transformer-db-database-modernization/",
        description: "Database modernization solution for IBM i",
        category: ProductCategory::Modernization,
        key_features: &[
            "Database structure analysis",
            "Data migration tools",
            "Schema modernization",
            "Data quality validation",
        ],
        related_products: &[],
        technical_details: None,
    },
    ProductRecord {
        name: "DOT Anonymizer",
        url: "https://www.arcadsoftware.com/dot/data-masking/dot-anonymizer/",
        description: "Data masking and anonymization solution",
        category: ProductCategory::Security,
        key_features: &[
            "Data privacy protection",
            "Compliance management",
            "Test data generation",
            "Sensitive data handling",
        ],
        related_products: &[],
        technical_details: None,
    },
];

/// One entry of the language/locale map.
#[derive(Clone, Copy, Debug)]
pub struct LanguageInfo {
    /// Keyword searched for in the question (lowercase substring match).
    pub keyword: &'static str,
    /// Display name of the language or region.
    pub name: &'static str,
    /// Locale-specific site URL used as the context source.
    pub url: &'static str,
}

const FR_URL: &str = "https://www.arcadsoftware.com/fr/";
const CONTACT_URL: &str = "https://www.arcadsoftware.com/about/contact-us/";

/// Language keywords, in match order. Later entries never shadow earlier
/// ones; the misspellings ("frace", "idnia", "neng") come from real traffic.
pub const LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo { keyword: "french", name: "French", url: FR_URL },
    LanguageInfo { keyword: "français", name: "French", url: FR_URL },
    LanguageInfo { keyword: "frace", name: "French", url: FR_URL },
    LanguageInfo {
        keyword: "spanish",
        name: "Spanish",
        url: "https://www.arcadsoftware.com/es/",
    },
    LanguageInfo {
        keyword: "german",
        name: "German",
        url: "https://www.arcadsoftware.com/de/",
    },
    LanguageInfo {
        keyword: "italian",
        name: "Italian",
        url: "https://www.arcadsoftware.com/it/",
    },
    LanguageInfo {
        keyword: "japanese",
        name: "Japanese",
        url: "https://www.arcadsoftware.com/ja/",
    },
    // No localized site for India; route to the contact page.
    LanguageInfo { keyword: "india", name: "India", url: CONTACT_URL },
    LanguageInfo { keyword: "idnia", name: "India", url: CONTACT_URL },
    LanguageInfo { keyword: "france", name: "French", url: FR_URL },
    LanguageInfo {
        keyword: "english",
        name: "English",
        url: crate::config::DEFAULT_PRODUCTS_URL,
    },
    LanguageInfo {
        keyword: "neng",
        name: "English",
        url: crate::config::DEFAULT_PRODUCTS_URL,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_names_are_unique() {
        for (i, a) in PRODUCTS.iter().enumerate() {
            for b in &PRODUCTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn every_product_has_features_and_url() {
        for product in PRODUCTS {
            assert!(!product.key_features.is_empty(), "{}", product.name);
            assert!(product.url.starts_with("https://"), "{}", product.name);
        }
    }
}
