use std::cmp::Ordering;

use diesel::{pg::Pg, prelude::*};

use crate::{
    db::schema::property_listings,
    helpers::{contains_ci, like_pattern},
    models::{
        location::{Location, LocationKind},
        property::Property,
        property_type::TransactionType,
    },
};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: u32,
    pub size: u32,
}

impl Page {
    pub fn new(index: u32, size: u32) -> Page {
        Page {
            index,
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Page {
        Page::new(0, size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.index) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::first(DEFAULT_PAGE_SIZE)
    }
}

/// Optional narrowing chosen by the visitor on top of the location filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    pub bedrooms: Vec<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ListingFilters {
    fn matches(&self, property: &Property) -> bool {
        let bedrooms_ok = self.bedrooms.is_empty()
            || property
                .bedrooms
                .map_or(false, |count| self.bedrooms.contains(&count));
        let min_ok = self.min_price.map_or(true, |min| property.price >= min);
        let max_ok = self.max_price.map_or(true, |max| property.price <= max);

        bedrooms_ok && min_ok && max_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LocationScope {
    County { county: String },
    Neighborhood { county: String, name: String },
    Estate { county: String, name: String },
}

impl LocationScope {
    fn matches(&self, property: &Property) -> bool {
        let in_county = |county: &str| {
            property
                .county
                .as_deref()
                .map_or(false, |value| contains_ci(value, county))
        };

        match self {
            LocationScope::County { county } => in_county(county),
            LocationScope::Neighborhood { county, name } => {
                in_county(county)
                    && (contains_ci(&property.city, name) || contains_ci(&property.address, name))
            }
            LocationScope::Estate { county, name } => {
                in_county(county) && contains_ci(&property.address, name)
            }
        }
    }
}

/// Filter for the listings shown on one location page.
///
/// The same predicate exists twice: [`LocationMatcher::matches`] evaluates it in memory and
/// [`LocationMatcher::query`] compiles it to `ILIKE` clauses against `property_listings`.
/// Both must accept exactly the same rows, given a UTF-8 database (see [`contains_ci`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMatcher {
    scope: LocationScope,
    property_keyword: String,
    transaction: TransactionType,
    filters: ListingFilters,
}

impl LocationMatcher {
    pub fn new(
        location: &Location,
        property_keyword: &str,
        transaction: TransactionType,
    ) -> LocationMatcher {
        let county = location.county_key().to_string();
        let name = location.name.trim().to_string();

        let scope = match location.kind {
            LocationKind::County => LocationScope::County { county },
            LocationKind::Neighborhood => LocationScope::Neighborhood { county, name },
            LocationKind::Estate => LocationScope::Estate { county, name },
        };

        LocationMatcher {
            scope,
            property_keyword: property_keyword.trim().to_string(),
            transaction,
            filters: ListingFilters::default(),
        }
    }

    /// Same property type and transaction, widened to the location's whole county.
    pub fn county_wide(&self) -> LocationMatcher {
        let county = match &self.scope {
            LocationScope::County { county }
            | LocationScope::Neighborhood { county, .. }
            | LocationScope::Estate { county, .. } => county.clone(),
        };

        LocationMatcher {
            scope: LocationScope::County { county },
            ..self.clone()
        }
    }

    pub fn with_filters(mut self, filters: ListingFilters) -> LocationMatcher {
        self.filters = filters;
        self
    }

    pub fn transaction(&self) -> TransactionType {
        self.transaction
    }

    pub fn property_keyword(&self) -> &str {
        &self.property_keyword
    }

    pub fn is_county_wide(&self) -> bool {
        matches!(self.scope, LocationScope::County { .. })
    }

    pub fn describe(&self) -> String {
        let place = match &self.scope {
            LocationScope::County { county } => county.clone(),
            LocationScope::Neighborhood { county, name } | LocationScope::Estate { county, name } => {
                format!("{name}, {county}")
            }
        };
        format!(
            "'{}' for {} in {}",
            self.property_keyword, self.transaction, place
        )
    }

    pub fn matches(&self, property: &Property) -> bool {
        property.is_approved
            && contains_ci(&property.property_type, &self.property_keyword)
            && property.price_type == self.transaction.as_db_str()
            && self.scope.matches(property)
            && self.filters.matches(property)
    }

    /// Filters, ranks and paginates rows already held in memory.
    pub fn select(&self, properties: &[Property], page: Page) -> Vec<Property> {
        let mut matching: Vec<Property> = properties
            .iter()
            .filter(|property| self.matches(property))
            .cloned()
            .collect();
        matching.sort_by(rank);

        matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect()
    }

    /// The filter as an unordered, unpaginated Diesel query.
    pub fn query(&self) -> property_listings::BoxedQuery<'static, Pg> {
        let mut query = property_listings::table
            .into_boxed()
            .filter(property_listings::is_approved.eq(true))
            .filter(property_listings::property_type.ilike(like_pattern(&self.property_keyword)))
            .filter(property_listings::price_type.eq(self.transaction.as_db_str()));

        query = match &self.scope {
            LocationScope::County { county } => {
                query.filter(property_listings::county.ilike(like_pattern(county)))
            }
            LocationScope::Neighborhood { county, name } => {
                let name_pattern = like_pattern(name);
                query
                    .filter(property_listings::county.ilike(like_pattern(county)))
                    .filter(
                        property_listings::city
                            .ilike(name_pattern.clone())
                            .or(property_listings::address.ilike(name_pattern)),
                    )
            }
            LocationScope::Estate { county, name } => query
                .filter(property_listings::county.ilike(like_pattern(county)))
                .filter(property_listings::address.ilike(like_pattern(name))),
        };

        if !self.filters.bedrooms.is_empty() {
            query = query.filter(property_listings::bedrooms.eq_any(self.filters.bedrooms.clone()));
        }
        if let Some(min) = self.filters.min_price {
            query = query.filter(property_listings::price.ge(min));
        }
        if let Some(max) = self.filters.max_price {
            query = query.filter(property_listings::price.le(max));
        }

        query
    }
}

/// Featured first, then newest. Id breaks ties so pages stay stable.
pub fn rank(a: &Property, b: &Property) -> Ordering {
    b.is_featured
        .cmp(&a.is_featured)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}
