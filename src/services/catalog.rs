//! Catalog filtering and sorting.

use std::str::FromStr;

use crate::models::{Product, QualityGrade};

/// Category filter applied alongside free-text search.
///
/// `Organic` and `Premium` are virtual categories over product flags;
/// `Tag` matches the product's category tag exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Organic,
    Premium,
    Tag(String),
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "organic" => Self::Organic,
            "premium" => Self::Premium,
            other => Self::Tag(other.to_string()),
        }
    }
}

impl CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Organic => product.organic,
            Self::Premium => product.quality == QualityGrade::Premium,
            Self::Tag(tag) => product.category == *tag,
        }
    }
}

/// Sort keys the storefront exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// Highest rated first.
    Rating,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Fastest delivery first, by the leading integer of the
    /// delivery-time string.
    Delivery,
}

impl SortKey {
    /// Parses a UI sort key; unrecognized keys yield `None`, which
    /// callers treat as "leave input order untouched".
    pub fn parse(key: &str) -> Option<Self> {
        Self::from_str(key).ok()
    }
}

/// Keeps products whose name, farmer name, or farmer state contains
/// `query` (case-insensitive; empty query matches all) and which pass
/// the category filter.
pub fn filter(products: &[Product], query: &str, category: &CategoryFilter) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|product| {
            let text_match = needle.is_empty()
                || product.name.to_lowercase().contains(&needle)
                || product.farmer_name.to_lowercase().contains(&needle)
                || product.farmer_state.to_lowercase().contains(&needle);
            text_match && category.matches(product)
        })
        .cloned()
        .collect()
}

/// Stable sort by `key`. Ties keep their input order.
pub fn sort(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Rating => sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceLow => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Delivery => sorted.sort_by(|a, b| {
            delivery_lead_bound(&a.delivery_time).cmp(&delivery_lead_bound(&b.delivery_time))
        }),
    }
    sorted
}

/// Convenience for UI callers holding a raw key string: unknown keys
/// preserve input order.
pub fn sort_by_key_str(products: &[Product], key: &str) -> Vec<Product> {
    match SortKey::parse(key) {
        Some(key) => sort(products, key),
        None => products.to_vec(),
    }
}

/// Lower bound of a delivery estimate like `"2-3 hours"`. Strings with
/// no leading digits sort last rather than panicking or producing a
/// NaN-style comparison.
fn delivery_lead_bound(estimate: &str) -> u32 {
    let digits: String = estimate
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(u32::MAX)
}
