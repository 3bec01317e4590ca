//! Canonical links from dynamic location pages to the hand-built pages that cover the same listings.

use crate::models::property_type::{PropertyCategory, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalMapping {
    pub slug: &'static str,
    pub category: Option<PropertyCategory>,
    pub transaction: Option<TransactionType>,
    pub bedrooms: Option<i32>,
    pub path: &'static str,
    /// Higher wins when several rows match. More specific rows get higher values.
    pub priority: u8,
}

impl CanonicalMapping {
    pub fn matches(
        &self,
        slug: &str,
        category: Option<PropertyCategory>,
        transaction: TransactionType,
        bedrooms: Option<i32>,
    ) -> bool {
        self.slug == slug
            && self.category.map_or(true, |wanted| category == Some(wanted))
            && self.transaction.map_or(true, |wanted| wanted == transaction)
            && self.bedrooms.map_or(true, |wanted| bedrooms == Some(wanted))
    }
}

const fn mapping(
    slug: &'static str,
    category: PropertyCategory,
    bedrooms: Option<i32>,
    path: &'static str,
    priority: u8,
) -> CanonicalMapping {
    CanonicalMapping {
        slug,
        category: Some(category),
        transaction: Some(TransactionType::Rent),
        bedrooms,
        path,
        priority,
    }
}

pub const CANONICAL_MAPPINGS: &[CanonicalMapping] = &[
    mapping("nairobi-county", PropertyCategory::Apartment, None, "/apartments-for-rent-nairobi", 2),
    mapping("nairobi-county", PropertyCategory::Apartment, Some(2), "/2-bedroom-apartment-nairobi", 3),
    mapping("nairobi-county", PropertyCategory::Bedsitter, None, "/bedsitter-nairobi", 2),
    mapping("nairobi-county", PropertyCategory::House, None, "/houses-for-rent-nairobi", 2),
    mapping("westlands", PropertyCategory::Apartment, None, "/apartments-westlands", 2),
    mapping("kilimani", PropertyCategory::Apartment, None, "/apartments-kilimani", 2),
    mapping("kasarani", PropertyCategory::Bedsitter, None, "/bedsitter-kasarani", 2),
    // Shadowed by the priority 2 row above; kept so the page stays known.
    mapping("nairobi-county", PropertyCategory::Apartment, None, "/cheap-apartments-nairobi", 1),
];

/// Picks the highest priority matching row. Equal priorities keep the earlier row.
pub fn resolve_in<'a>(
    table: &'a [CanonicalMapping],
    slug: &str,
    property_type: &str,
    transaction: TransactionType,
    bedrooms: Option<i32>,
) -> Option<&'a CanonicalMapping> {
    let category = PropertyCategory::from_listing_type(property_type);

    table
        .iter()
        .filter(|row| row.matches(slug, category, transaction, bedrooms))
        .fold(None::<&CanonicalMapping>, |best, row| match best {
            Some(current) if current.priority >= row.priority => Some(current),
            _ => Some(row),
        })
}

pub fn canonical_path(
    slug: &str,
    property_type: &str,
    transaction: TransactionType,
    bedrooms: Option<i32>,
) -> Option<&'static str> {
    resolve_in(CANONICAL_MAPPINGS, slug, property_type, transaction, bedrooms).map(|row| row.path)
}

pub fn should_use_canonical(
    slug: &str,
    property_type: &str,
    transaction: TransactionType,
    bedrooms: Option<i32>,
) -> bool {
    canonical_path(slug, property_type, transaction, bedrooms).is_some()
}

pub fn full_canonical_url(
    site_url: &str,
    slug: &str,
    property_type: &str,
    transaction: TransactionType,
    bedrooms: Option<i32>,
) -> Option<String> {
    canonical_path(slug, property_type, transaction, bedrooms)
        .map(|path| format!("{}{}", site_url.trim_end_matches('/'), path))
}
