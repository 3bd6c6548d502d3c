//! Location repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `locations` storage.
//! - Keep the default-first, name-second listing order that
//!   active-location resolution depends on.
//!
//! # Invariants
//! - Write paths call `Location::validate()` before SQL mutations.
//! - Deleting a location clears `items.location_uuid` instead of removing
//!   the items (enforced by the schema's ON DELETE SET NULL).

use rusqlite::{params, Connection, Row};

use crate::model::location::{Location, LocationId};
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_bool, parse_uuid, RepoError, RepoResult,
};

const LOCATION_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    address,
    zip_code,
    city,
    country_code,
    is_default
FROM locations";

const LOCATION_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "address",
    "zip_code",
    "city",
    "country_code",
    "is_default",
];

/// Repository interface for location CRUD operations.
pub trait LocationRepository {
    fn create_location(&self, location: &Location) -> RepoResult<LocationId>;
    fn update_location(&self, location: &Location) -> RepoResult<()>;
    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>>;
    /// Lists every location, default flag first, then name, then id.
    fn list_locations(&self) -> RepoResult<Vec<Location>>;
    fn delete_location(&self, id: LocationId) -> RepoResult<()>;
}

/// SQLite-backed location repository.
pub struct SqliteLocationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocationRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "locations", LOCATION_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl LocationRepository for SqliteLocationRepository<'_> {
    fn create_location(&self, location: &Location) -> RepoResult<LocationId> {
        location.validate()?;

        self.conn.execute(
            "INSERT INTO locations (
                uuid,
                name,
                address,
                zip_code,
                city,
                country_code,
                is_default
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                location.id.to_string(),
                location.name.as_str(),
                location.address.as_deref(),
                location.zip_code.as_deref(),
                location.city.as_deref(),
                location.country_code.as_deref(),
                bool_to_int(location.is_default),
            ],
        )?;

        Ok(location.id)
    }

    fn update_location(&self, location: &Location) -> RepoResult<()> {
        location.validate()?;

        let changed = self.conn.execute(
            "UPDATE locations
             SET
                name = ?1,
                address = ?2,
                zip_code = ?3,
                city = ?4,
                country_code = ?5,
                is_default = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                location.name.as_str(),
                location.address.as_deref(),
                location.zip_code.as_deref(),
                location.city.as_deref(),
                location.country_code.as_deref(),
                bool_to_int(location.is_default),
                location.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(location.id));
        }

        Ok(())
    }

    fn get_location(&self, id: LocationId) -> RepoResult<Option<Location>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOCATION_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_location_row(row)?));
        }

        Ok(None)
    }

    fn list_locations(&self) -> RepoResult<Vec<Location>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOCATION_SELECT_SQL} ORDER BY is_default DESC, name ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut locations = Vec::new();
        while let Some(row) = rows.next()? {
            locations.push(parse_location_row(row)?);
        }

        Ok(locations)
    }

    fn delete_location(&self, id: LocationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM locations WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_location_row(row: &Row<'_>) -> RepoResult<Location> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "locations.uuid")?;
    let is_default = parse_bool(row.get("is_default")?, "locations.is_default")?;

    let location = Location {
        id,
        name: row.get("name")?,
        address: row.get("address")?,
        zip_code: row.get("zip_code")?,
        city: row.get("city")?,
        country_code: row.get("country_code")?,
        is_default,
    };
    location.validate()?;
    Ok(location)
}
