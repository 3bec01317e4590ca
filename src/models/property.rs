use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Serialize)]
#[diesel(table_name = crate::db::schema::property_listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Property {
    pub id: i32,
    pub property_title: String,
    pub property_type: String,
    pub price: i64,
    pub price_type: String,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub address: String,
    pub city: String,
    pub county: Option<String>,
    pub is_approved: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column changes produced by the normalization job. `None` leaves a column alone.
#[derive(Debug, Default, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = crate::db::schema::property_listings)]
pub struct PropertyChangeset {
    pub price_type: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub bedrooms: Option<i32>,
}

impl PropertyChangeset {
    pub fn is_empty(&self) -> bool {
        self.price_type.is_none()
            && self.county.is_none()
            && self.city.is_none()
            && self.bedrooms.is_none()
    }
}
