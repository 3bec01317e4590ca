use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;

use crate::{
    config::Config,
    db::{self, establish_connection},
    helpers::strip_county_suffix,
    matcher::LocationMatcher,
    models::{
        location::{Location, LocationKind},
        property_type::TransactionType,
    },
};

pub const AUDITED_PROPERTY_TYPES: [&str; 8] = [
    "House",
    "Apartment",
    "Villa",
    "Maisonette",
    "Bungalow",
    "Townhouse",
    "Studio",
    "Bedsitter",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub location_slug: String,
    pub location_name: String,
    pub kind: LocationKind,
    pub county: String,
    pub property_type: &'static str,
    pub transaction: TransactionType,
    pub current_count: i64,
    pub needed: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub total_locations: usize,
    pub locations_with_gaps: usize,
    pub gaps: Vec<CoverageGap>,
    pub orphaned_locations: Vec<String>,
}

impl AuditReport {
    pub fn gaps_by_county(&self) -> BTreeMap<&str, usize> {
        let mut tally = BTreeMap::new();
        for gap in &self.gaps {
            *tally.entry(gap.county.as_str()).or_insert(0) += 1;
        }
        tally
    }
}

/// Every location/type/transaction combination with fewer than `min_listings` matches.
pub fn coverage_gaps<F, E>(
    locations: &[Location],
    min_listings: i64,
    mut count: F,
) -> Result<Vec<CoverageGap>, E>
where
    F: FnMut(&LocationMatcher) -> Result<i64, E>,
{
    let mut gaps = Vec::new();

    for location in locations {
        for property_type in AUDITED_PROPERTY_TYPES {
            for transaction in TransactionType::all() {
                let matcher = LocationMatcher::new(location, property_type, transaction);
                let current_count = count(&matcher)?;

                if current_count < min_listings {
                    gaps.push(CoverageGap {
                        location_slug: location.slug.clone(),
                        location_name: location.name.clone(),
                        kind: location.kind,
                        county: location.county.clone(),
                        property_type,
                        transaction,
                        current_count,
                        needed: min_listings - current_count,
                    });
                }
            }
        }
    }

    Ok(gaps)
}

/// Neighborhoods and estates whose `county` names no county-type location.
/// Their pages can never show a listing.
pub fn find_orphaned_locations(locations: &[Location]) -> Vec<&Location> {
    let counties: HashSet<String> = locations
        .iter()
        .filter(|location| location.kind == LocationKind::County)
        .map(|location| strip_county_suffix(&location.name).to_lowercase())
        .collect();

    locations
        .iter()
        .filter(|location| location.kind != LocationKind::County)
        .filter(|location| !counties.contains(&location.county_key().to_lowercase()))
        .collect()
}

pub fn run_audit(config: &Config) -> Result<AuditReport> {
    let mut conn = establish_connection(config)?;
    let locations = db::location::get_all_active(&mut conn)?;
    info!("Auditing coverage for {} active locations", locations.len());

    let gaps = coverage_gaps(&locations, config.min_listings_per_page, |matcher| {
        db::property::count_matching(&mut conn, matcher)
    })?;

    let orphaned_locations: Vec<String> = find_orphaned_locations(&locations)
        .into_iter()
        .map(|location| location.slug.clone())
        .collect();
    for slug in &orphaned_locations {
        warn!("Location '{}' points at a county that does not exist", slug);
    }

    let locations_with_gaps = gaps
        .iter()
        .map(|gap| gap.location_slug.as_str())
        .collect::<HashSet<_>>()
        .len();

    let report = AuditReport {
        total_locations: locations.len(),
        locations_with_gaps,
        gaps,
        orphaned_locations,
    };

    info!(
        "Locations with gaps: {} / {}, total gaps: {}",
        report.locations_with_gaps,
        report.total_locations,
        report.gaps.len()
    );
    for (county, count) in report.gaps_by_county() {
        info!("  {}: {} gaps", county, count);
    }

    Ok(report)
}
