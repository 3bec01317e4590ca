use diesel::{prelude::*, result::Error};
use log::warn;

use super::schema::locations;
use crate::models::location::{Location, LocationKind, LocationRow};

const RELATED_LIMIT: i64 = 50;

fn into_locations(rows: Vec<LocationRow>) -> Vec<Location> {
    rows.into_iter()
        .filter_map(|row| match Location::try_from(row) {
            Ok(location) => Some(location),
            Err(e) => {
                warn!("Skipping location row: {}", e);
                None
            }
        })
        .collect()
}

pub fn get_active_by_slug(conn: &mut PgConnection, target_slug: &str) -> Result<Option<Location>, Error> {
    let row: Option<LocationRow> = locations::table
        .filter(locations::slug.eq(target_slug))
        .filter(locations::is_active.eq(true))
        .select(LocationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Location::try_from)
        .transpose()
        .map_err(|e| Error::DeserializationError(e.into()))
}

pub fn get_all_active(conn: &mut PgConnection) -> Result<Vec<Location>, Error> {
    let rows: Vec<LocationRow> = locations::table
        .filter(locations::is_active.eq(true))
        .order((locations::county.asc(), locations::name.asc()))
        .select(LocationRow::as_select())
        .load(conn)?;

    Ok(into_locations(rows))
}

/// Other active locations in the same county, alphabetically.
pub fn get_related(conn: &mut PgConnection, location: &Location) -> Result<Vec<Location>, Error> {
    let county = match location.kind {
        LocationKind::County => &location.name,
        LocationKind::Neighborhood | LocationKind::Estate => &location.county,
    };

    let rows: Vec<LocationRow> = locations::table
        .filter(locations::is_active.eq(true))
        .filter(locations::county.eq(county.as_str()))
        .filter(locations::slug.ne(location.slug.as_str()))
        .order(locations::name.asc())
        .limit(RELATED_LIMIT)
        .select(LocationRow::as_select())
        .load(conn)?;

    Ok(into_locations(rows))
}
