use std::collections::HashMap;

use anyhow::Result;
use log::{info, warn};

use crate::{
    config::Config,
    db::{self, establish_connection},
    helpers::{bedrooms_from_text, strip_county_suffix},
    models::{
        location::{Location, LocationKind},
        property::{Property, PropertyChangeset},
        property_type::TransactionType,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpdate {
    pub id: i32,
    pub changes: PropertyChangeset,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NormalizationPlan {
    pub updates: Vec<PropertyUpdate>,
    /// Rows whose `price_type` could not be read as rent or sale; left untouched.
    pub unrecognized_price_types: Vec<i32>,
}

struct LocationNames {
    counties: HashMap<String, String>,
    places: HashMap<String, String>,
}

impl LocationNames {
    fn new(locations: &[Location]) -> LocationNames {
        let mut counties = HashMap::new();
        let mut places = HashMap::new();

        for location in locations {
            match location.kind {
                LocationKind::County => {
                    let name = strip_county_suffix(&location.name);
                    counties.insert(name.to_lowercase(), name.to_string());
                }
                LocationKind::Neighborhood | LocationKind::Estate => {
                    let name = location.name.trim();
                    // first one wins, as with duplicate estate names across counties
                    places
                        .entry(name.to_lowercase())
                        .or_insert_with(|| name.to_string());
                }
            }
        }

        LocationNames { counties, places }
    }
}

fn normalized_county(raw: &str, names: &LocationNames) -> String {
    let stripped = strip_county_suffix(raw);
    names
        .counties
        .get(&stripped.to_lowercase())
        .cloned()
        .unwrap_or_else(|| stripped.to_string())
}

/// Works out the column rewrites that bring listings onto one convention.
///
/// Planning over already-normalized rows yields no updates.
pub fn plan_normalization(properties: &[Property], locations: &[Location]) -> NormalizationPlan {
    let names = LocationNames::new(locations);
    let mut plan = NormalizationPlan::default();

    for property in properties {
        let mut changes = PropertyChangeset::default();

        match TransactionType::parse_loose(&property.price_type) {
            Some(transaction) if transaction.as_db_str() != property.price_type => {
                changes.price_type = Some(transaction.as_db_str().to_string());
            }
            Some(_) => {}
            None => plan.unrecognized_price_types.push(property.id),
        }

        if let Some(county) = property.county.as_deref() {
            let target = normalized_county(county, &names);
            if target != county {
                changes.county = Some(target);
            }
        }

        if let Some(place) = names.places.get(&property.city.trim().to_lowercase()) {
            if *place != property.city {
                changes.city = Some(place.clone());
            }
        }

        if property.bedrooms.is_none() {
            changes.bedrooms = bedrooms_from_text(&property.property_title)
                .or_else(|| bedrooms_from_text(&property.property_type));
        }

        if !changes.is_empty() {
            plan.updates.push(PropertyUpdate {
                id: property.id,
                changes,
            });
        }
    }

    plan
}

pub fn run_normalization(config: &Config, dry_run: bool) -> Result<NormalizationPlan> {
    let mut conn = establish_connection(config)?;

    let locations = db::location::get_all_active(&mut conn)?;
    let properties = db::property::get_all(&mut conn)?;
    info!(
        "Loaded {} active locations and {} properties",
        locations.len(),
        properties.len()
    );

    let plan = plan_normalization(&properties, &locations);
    if !plan.unrecognized_price_types.is_empty() {
        warn!(
            "{} properties have an unrecognized price_type: {:?}",
            plan.unrecognized_price_types.len(),
            plan.unrecognized_price_types
        );
    }

    if dry_run {
        for update in &plan.updates {
            info!("Would update property {}: {:?}", update.id, update.changes);
        }
        info!("Dry run: {} properties would change", plan.updates.len());
        return Ok(plan);
    }

    let changes: Vec<(i32, PropertyChangeset)> = plan
        .updates
        .iter()
        .map(|update| (update.id, update.changes.clone()))
        .collect();
    let updated = db::property::apply_changes(&mut conn, &changes)?;
    info!("Normalized {} of {} properties", updated, properties.len());

    Ok(plan)
}
