use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Listing transaction. Stored in `property_listings.price_type` as `"rent"` / `"sale"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Rent,
    Sale,
}

impl TransactionType {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            TransactionType::Rent => "rent",
            TransactionType::Sale => "sale",
        }
    }

    /// Recognizes the historical spellings found in `price_type`
    /// ("For Rent", "RENT", "to let", "For Sale", ...).
    pub fn parse_loose(raw: &str) -> Option<TransactionType> {
        let value = raw.trim().to_lowercase();
        let value = value.strip_prefix("for ").unwrap_or(value.as_str()).trim();

        match value {
            "rent" | "rental" | "to let" | "let" | "lease" => Some(TransactionType::Rent),
            "sale" | "sell" | "buy" => Some(TransactionType::Sale),
            _ => None,
        }
    }

    pub fn all() -> [TransactionType; 2] {
        [TransactionType::Sale, TransactionType::Rent]
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::parse_loose(s).ok_or_else(|| format!("unknown transaction type '{s}'"))
    }
}

/// Buckets used when comparing a free-text property type against the canonical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Apartment,
    Bedsitter,
    House,
    Land,
}

// Order matters: "Studio Apartment" is an apartment, "Townhouse" is a house.
const CATEGORY_RULES: &[(PropertyCategory, &[&str])] = &[
    (PropertyCategory::Apartment, &["apartment", "flat"]),
    (PropertyCategory::Bedsitter, &["bedsitter", "studio"]),
    (
        PropertyCategory::House,
        &["house", "bungalow", "maisonette", "townhouse", "villa"],
    ),
    (PropertyCategory::Land, &["land", "plot"]),
];

impl PropertyCategory {
    pub fn from_listing_type(raw: &str) -> Option<PropertyCategory> {
        let lowered = raw.to_lowercase();

        CATEGORY_RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|needle| lowered.contains(needle)))
            .map(|(category, _)| *category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Apartment => "apartment",
            PropertyCategory::Bedsitter => "bedsitter",
            PropertyCategory::House => "house",
            PropertyCategory::Land => "land",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
