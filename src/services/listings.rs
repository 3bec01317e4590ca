use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use log::{error, info};
use serde::Serialize;

use crate::{
    canonical,
    config::Config,
    db::{self, establish_connection},
    logger::BACKEND_TARGET,
    matcher::{ListingFilters, LocationMatcher, Page},
    models::{location::Location, property::Property, property_type::TransactionType},
};

/// Whether an empty page means "nothing matched" or "the backend could not be asked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listings {
    pub properties: Vec<Property>,
    pub status: QueryStatus,
    pub has_more: bool,
    pub used_fallback: bool,
}

impl Listings {
    pub fn found(properties: Vec<Property>, page: Page) -> Listings {
        let has_more = properties.len() as u32 == page.size;
        Listings {
            properties,
            status: QueryStatus::Ok,
            has_more,
            used_fallback: false,
        }
    }

    pub fn degraded() -> Listings {
        Listings {
            properties: Vec::new(),
            status: QueryStatus::Degraded,
            has_more: false,
            used_fallback: false,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == QueryStatus::Degraded
    }
}

pub fn find_listings(config: &Config, matcher: &LocationMatcher, page: Page) -> Listings {
    let result = establish_connection(config)
        .map_err(anyhow::Error::from)
        .and_then(|mut conn| {
            db::property::find_matching(&mut conn, matcher, page).map_err(anyhow::Error::from)
        });

    match result {
        Ok(properties) => Listings::found(properties, page),
        Err(e) => {
            error!(
                target: BACKEND_TARGET,
                "Listing query {} failed: {:?}",
                matcher.describe(),
                e
            );
            Listings::degraded()
        }
    }
}

/// Tops up a thin page with rows from a broader, caller-chosen query.
///
/// `fallback` runs only when `primary` answered normally with fewer than `threshold` rows.
/// Its rows come after the primary ones, ids already shown are dropped and the merged
/// result is cut back to one `page`.
pub fn with_fallback<F>(primary: Listings, page: Page, threshold: usize, fallback: F) -> Listings
where
    F: FnOnce() -> Listings,
{
    if primary.is_degraded() || primary.properties.len() >= threshold {
        return primary;
    }

    let extra = fallback();
    let mut seen: HashSet<i32> = primary.properties.iter().map(|p| p.id).collect();
    let mut properties = primary.properties;
    properties.extend(extra.properties.into_iter().filter(|p| seen.insert(p.id)));
    properties.truncate(page.size as usize);

    Listings {
        has_more: properties.len() as u32 == page.size,
        properties,
        status: extra.status,
        used_fallback: true,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyStats {
    pub total_count: usize,
    pub min_price: i64,
    pub max_price: i64,
    pub avg_price: i64,
    pub bedroom_distribution: BTreeMap<i32, usize>,
}

impl PropertyStats {
    pub fn from_properties(properties: &[Property]) -> PropertyStats {
        if properties.is_empty() {
            return PropertyStats::default();
        }

        let prices = properties.iter().map(|p| p.price);
        let total: i64 = prices.clone().sum();
        let mut bedroom_distribution = BTreeMap::new();
        for bedrooms in properties.iter().filter_map(|p| p.bedrooms).filter(|b| *b > 0) {
            *bedroom_distribution.entry(bedrooms).or_insert(0) += 1;
        }

        PropertyStats {
            total_count: properties.len(),
            min_price: prices.clone().min().unwrap_or_default(),
            max_price: prices.max().unwrap_or_default(),
            avg_price: total / properties.len() as i64,
            bedroom_distribution,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub property_keyword: String,
    pub transaction: TransactionType,
    pub page: Page,
    pub filters: ListingFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationPage {
    pub location: Location,
    pub listings: Listings,
    pub stats: PropertyStats,
    pub canonical_url: Option<String>,
}

/// Everything a location page needs. `None` when the slug is unknown or inactive.
pub fn location_page(config: &Config, slug: &str, request: &ListingRequest) -> Option<LocationPage> {
    let location = find_location(config, slug)?;

    let matcher = LocationMatcher::new(&location, &request.property_keyword, request.transaction)
        .with_filters(request.filters.clone());
    let primary = find_listings(config, &matcher, request.page);

    // Only the first page of a sub-county location is topped up.
    let listings = if request.page.index == 0 && !matcher.is_county_wide() {
        with_fallback(primary, request.page, config.fallback_threshold, || {
            info!("Falling back to county-wide listings for {}", matcher.describe());
            find_listings(config, &matcher.county_wide(), request.page)
        })
    } else {
        primary
    };

    let bedrooms = match request.filters.bedrooms.as_slice() {
        [single] => Some(*single),
        _ => None,
    };
    let canonical_url = canonical::full_canonical_url(
        &config.site_url,
        &location.slug,
        &request.property_keyword,
        request.transaction,
        bedrooms,
    );
    let stats = PropertyStats::from_properties(&listings.properties);

    Some(LocationPage {
        location,
        listings,
        stats,
        canonical_url,
    })
}

/// Lookup failures are logged and read as "not found".
pub fn find_location(config: &Config, slug: &str) -> Option<Location> {
    let result = establish_connection(config)
        .map_err(anyhow::Error::from)
        .and_then(|mut conn| {
            db::location::get_active_by_slug(&mut conn, slug).map_err(anyhow::Error::from)
        });

    result.unwrap_or_else(|e| {
        error!(target: BACKEND_TARGET, "Location lookup for '{}' failed: {:?}", slug, e);
        None
    })
}

pub fn related_locations(config: &Config, location: &Location) -> Result<Vec<Location>> {
    let mut conn = establish_connection(config)?;
    Ok(db::location::get_related(&mut conn, location)?)
}
