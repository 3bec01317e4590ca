use std::fmt;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::helpers::strip_county_suffix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    County,
    Neighborhood,
    Estate,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::County => "county",
            LocationKind::Neighborhood => "neighborhood",
            LocationKind::Estate => "estate",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LocationKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "county" => Ok(LocationKind::County),
            "neighborhood" | "neighbourhood" => Ok(LocationKind::Neighborhood),
            "estate" => Ok(LocationKind::Estate),
            other => Err(format!("unknown location type '{other}'")),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::db::schema::locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LocationRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub county: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub county: String,
    pub city: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl TryFrom<LocationRow> for Location {
    type Error = String;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        let kind = LocationKind::try_from(row.kind.as_str())
            .map_err(|e| format!("location '{}': {e}", row.slug))?;

        Ok(Location {
            id: row.id,
            name: row.name,
            slug: row.slug,
            kind,
            county: row.county,
            city: row.city,
            description: row.description,
            is_active: row.is_active,
        })
    }
}

impl Location {
    /// County name as it appears in `property_listings.county`.
    pub fn county_key(&self) -> &str {
        match self.kind {
            LocationKind::County => strip_county_suffix(&self.name),
            LocationKind::Neighborhood | LocationKind::Estate => strip_county_suffix(&self.county),
        }
    }

    pub fn new(
        slug: impl Into<String>,
        kind: LocationKind,
        name: impl Into<String>,
        county: impl Into<String>,
    ) -> Location {
        Location {
            id: 0,
            name: name.into(),
            slug: slug.into(),
            kind,
            county: county.into(),
            city: None,
            description: None,
            is_active: true,
        }
    }
}
