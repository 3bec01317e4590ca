use diesel::{prelude::*, result::Error};
use log::info;

use super::schema::property_listings;
use crate::{
    matcher::{LocationMatcher, Page},
    models::property::{Property, PropertyChangeset},
};

pub fn find_matching(
    conn: &mut PgConnection,
    matcher: &LocationMatcher,
    page: Page,
) -> Result<Vec<Property>, Error> {
    matcher
        .query()
        .order((
            property_listings::is_featured.desc(),
            property_listings::created_at.desc(),
            property_listings::id.desc(),
        ))
        .offset(page.offset())
        .limit(page.limit())
        .select(Property::as_select())
        .load(conn)
}

pub fn count_matching(conn: &mut PgConnection, matcher: &LocationMatcher) -> Result<i64, Error> {
    matcher.query().count().get_result(conn)
}

pub fn get_all(conn: &mut PgConnection) -> Result<Vec<Property>, Error> {
    property_listings::table
        .order(property_listings::id.asc())
        .select(Property::as_select())
        .load(conn)
}

/// Applies every changeset or none of them.
pub fn apply_changes(
    conn: &mut PgConnection,
    changes: &[(i32, PropertyChangeset)],
) -> Result<usize, Error> {
    conn.transaction(|conn| {
        let mut updated = 0;
        for (target_id, changeset) in changes.iter().filter(|(_, c)| !c.is_empty()) {
            updated += diesel::update(property_listings::table.find(*target_id))
                .set(changeset)
                .execute(conn)?;
        }
        info!("Updated {} rows in property_listings", updated);
        Ok(updated)
    })
}
