pub mod location;
pub mod property;
pub mod schema;

use diesel::{Connection, ConnectionResult, PgConnection};

use crate::config::Config;

pub fn establish_connection(config: &Config) -> ConnectionResult<PgConnection> {
    PgConnection::establish(&config.database_url)
}
