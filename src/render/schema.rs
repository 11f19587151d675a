//! JSON-LD structured data for comparison pages.
//!
//! One `Product` node per side, wrapped in an `@graph`:
//!
//! ```json
//! {
//!   "@context": "https://schema.org",
//!   "@graph": [
//!     {
//!       "@type": "Product",
//!       "name": "Jasper",
//!       "description": "...",
//!       "offers": { "@type": "Offer", "price": 49.0, "priceCurrency": "USD", "url": "..." },
//!       "review": {
//!         "@type": "Review",
//!         "reviewRating": { "@type": "Rating", "ratingValue": 4.7, "bestRating": 5 },
//!         "author": { "@type": "Organization", "name": "Tool Arena" }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Numbers come from the parsed price and score, the same values the visible
//! table shows. An unknown price drops `offers.price`; an unknown score drops
//! `review`.

use crate::types::ResolvedItem;
use serde::Serialize;

const CONTEXT: &str = "https://schema.org";
const CURRENCY: &str = "USD";

#[derive(Debug, Serialize)]
struct Graph<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@graph")]
    graph: Vec<Product<'a>>,
}

#[derive(Debug, Serialize)]
struct Product<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    description: &'a str,
    offers: Offer<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    review: Option<Review<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Offer<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    price_currency: &'static str,
    #[serde(skip_serializing_if = "is_blank")]
    url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Review<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    review_rating: Rating,
    author: Author<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Rating {
    #[serde(rename = "@type")]
    kind: &'static str,
    rating_value: f64,
    best_rating: u8,
}

#[derive(Debug, Serialize)]
struct Author<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

fn is_blank(s: &&str) -> bool {
    s.is_empty()
}

fn product<'a>(item: &'a ResolvedItem<'_>, site_name: &'a str) -> Product<'a> {
    Product {
        kind: "Product",
        name: item.name(),
        description: &item.record.description,
        offers: Offer {
            kind: "Offer",
            price: item.price.amount(),
            price_currency: CURRENCY,
            url: item.link,
        },
        review: item.record.rating().map(|value| Review {
            kind: "Review",
            review_rating: Rating {
                kind: "Rating",
                rating_value: value,
                best_rating: 5,
            },
            author: Author {
                kind: "Organization",
                name: site_name,
            },
        }),
    }
}

/// Serialize the `@graph` for a pair, safe to embed in a `<script>` element.
pub fn comparison_json_ld(
    a: &ResolvedItem<'_>,
    b: &ResolvedItem<'_>,
    site_name: &str,
) -> Result<String, serde_json::Error> {
    let graph = Graph {
        context: CONTEXT,
        graph: vec![product(a, site_name), product(b, site_name)],
    };
    let json = serde_json::to_string(&graph)?;
    Ok(json.replace("</", "<\\/"))
}
