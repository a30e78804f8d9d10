//! Markdown rendering for local catalog answers.

use std::fmt::Write;

use super::ProductCategory;
use super::data::{PRODUCTS, ProductRecord};

/// Full detail block for one product.
pub fn detail(product: &ProductRecord) -> String {
    let mut out = String::new();
    let _ = write!(out, "**{}**\n\n", product.name);
    let _ = write!(out, "{}\n\n", product.description);
    let _ = write!(out, "**Category:** {}\n\n", product.category);

    out.push_str("**Key Features:**\n");
    for feature in product.key_features {
        let _ = writeln!(out, "- {feature}");
    }
    out.push('\n');

    if let Some(details) = &product.technical_details {
        if !details.platforms.is_empty() {
            out.push_str("**Supported Platforms:**\n");
            for platform in details.platforms {
                let _ = writeln!(out, "- {platform}");
            }
            out.push('\n');
        }
        if !details.integrations.is_empty() {
            out.push_str("**Integrations:**\n");
            for integration in details.integrations {
                let _ = writeln!(out, "- {integration}");
            }
            out.push('\n');
        }
    }

    if !product.related_products.is_empty() {
        out.push_str("**Related Products:**\n");
        for related in product.related_products {
            let _ = writeln!(out, "- {related}");
        }
        out.push('\n');
    }

    let _ = write!(out, "For more details, visit: {}\n\n", product.url);
    out
}

/// Side-by-side comparison of two products.
pub fn comparison(first: &ProductRecord, second: &ProductRecord) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "Let me compare **{}** and **{}** for you:\n\n",
        first.name, second.name
    );

    out.push_str("**Categories:**\n");
    let _ = writeln!(out, "- {}: {}", first.name, first.category);
    let _ = write!(out, "- {}: {}\n\n", second.name, second.category);

    out.push_str("**Purpose:**\n");
    let _ = writeln!(out, "- {}: {}", first.name, first.description);
    let _ = write!(out, "- {}: {}\n\n", second.name, second.description);

    out.push_str("**Key Features Comparison:**\n\n");
    let _ = writeln!(out, "*{}:*", first.name);
    for feature in first.key_features {
        let _ = writeln!(out, "- {feature}");
    }
    let _ = writeln!(out, "\n*{}:*", second.name);
    for feature in second.key_features {
        let _ = writeln!(out, "- {feature}");
    }
    out.push('\n');

    out.push_str("For more detailed information:\n");
    let _ = writeln!(out, "- {}: {}", first.name, first.url);
    let _ = writeln!(out, "- {}: {}", second.name, second.url);
    out
}

/// All products grouped by category, with a count and example follow-ups.
pub fn overview() -> String {
    // Categories keep first-appearance order from the catalog.
    let mut grouped: Vec<(ProductCategory, Vec<&ProductRecord>)> = Vec::new();
    for product in PRODUCTS {
        match grouped.iter_mut().find(|(cat, _)| *cat == product.category) {
            Some((_, members)) => members.push(product),
            None => grouped.push((product.category, vec![product])),
        }
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "ARCAD Software offers {} powerful products for IBM i modernization and DevOps \
         solutions.\n\n",
        PRODUCTS.len()
    );
    out.push_str("Here's an overview of our products by category:\n\n");

    for (category, members) in &grouped {
        let _ = writeln!(out, "**{category}**");
        for product in members {
            let _ = writeln!(out, "- **{}**: {}", product.name, product.description);
        }
        out.push('\n');
    }

    out.push_str("Would you like to know more about any specific product? Just ask!\n");
    out.push_str("For example:\n");
    out.push_str("- 'Tell me more about ARCAD-Skipper'\n");
    out.push_str("- 'What are the features of ARCAD-Observer?'\n");
    out.push_str("- 'Compare ARCAD-Transformer with ARCAD-CodeChecker'\n");
    out
}
