#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use nyumba::models::{
    location::{Location, LocationKind},
    property::Property,
};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn property(id: i32, county: &str, city: &str, property_type: &str, price_type: &str) -> Property {
    Property {
        id,
        property_title: format!("Listing {id}"),
        property_type: property_type.to_string(),
        price: 50_000,
        price_type: price_type.to_string(),
        bedrooms: None,
        bathrooms: None,
        address: String::new(),
        city: city.to_string(),
        county: Some(county.to_string()),
        is_approved: true,
        is_featured: false,
        created_at: base_time() + Duration::days(i64::from(id)),
        updated_at: base_time(),
    }
}

pub fn westlands() -> Location {
    Location::new("westlands", LocationKind::Neighborhood, "Westlands", "Nairobi")
}

pub fn nairobi_county() -> Location {
    Location::new("nairobi-county", LocationKind::County, "Nairobi County", "Nairobi County")
}
