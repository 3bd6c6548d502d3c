//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `items` storage.
//! - Expose the location/status filters list surfaces query by.
//!
//! # Invariants
//! - Write paths call `Item::validate()` before SQL mutations.
//! - `status` is persisted as the closed integer set 1/2/3; any other
//!   stored value is rejected on read.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::model::item::{Item, ItemId, ItemStatus};
use crate::model::location::LocationId;
use crate::repo::{date_to_db, ensure_connection_ready, parse_date, parse_uuid, RepoError, RepoResult};

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    location_uuid,
    name,
    status,
    quantity,
    area,
    brand,
    model_number,
    serial_number,
    purchase_value,
    purchase_place,
    purchase_year,
    warranty_expiration,
    notes,
    manual_url,
    end_of_service_date
FROM items";

const ITEM_COLUMNS: &[&str] = &[
    "uuid",
    "location_uuid",
    "name",
    "status",
    "quantity",
    "area",
    "brand",
    "model_number",
    "serial_number",
    "purchase_value",
    "purchase_place",
    "purchase_year",
    "warranty_expiration",
    "notes",
    "manual_url",
    "end_of_service_date",
];

/// Query options for listing items.
#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    /// Restrict to one location when set.
    pub location: Option<LocationId>,
    /// Restrict to one lifecycle status when set.
    pub status: Option<ItemStatus>,
}

/// Repository interface for item CRUD operations.
pub trait ItemRepository {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId>;
    fn update_item(&self, item: &Item) -> RepoResult<()>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Lists items in name order, id as tie-break.
    fn list_items(&self, query: &ItemListQuery) -> RepoResult<Vec<Item>>;
    /// Hard-deletes the item; its tasks go with it via FK cascade.
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "items", ITEM_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO items (
                uuid,
                location_uuid,
                name,
                status,
                quantity,
                area,
                brand,
                model_number,
                serial_number,
                purchase_value,
                purchase_place,
                purchase_year,
                warranty_expiration,
                notes,
                manual_url,
                end_of_service_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                item.id.to_string(),
                item.location_id.map(|id| id.to_string()),
                item.name.as_str(),
                item_status_to_db(item.status),
                item.quantity,
                item.area.as_deref(),
                item.brand.as_deref(),
                item.model_number.as_deref(),
                item.serial_number.as_deref(),
                item.purchase_value,
                item.purchase_place.as_deref(),
                item.purchase_year,
                date_to_db(item.warranty_expiration),
                item.notes.as_deref(),
                item.manual_url.as_deref(),
                date_to_db(item.end_of_service_date),
            ],
        )?;

        Ok(item.id)
    }

    fn update_item(&self, item: &Item) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE items
             SET
                location_uuid = ?1,
                name = ?2,
                status = ?3,
                quantity = ?4,
                area = ?5,
                brand = ?6,
                model_number = ?7,
                serial_number = ?8,
                purchase_value = ?9,
                purchase_place = ?10,
                purchase_year = ?11,
                warranty_expiration = ?12,
                notes = ?13,
                manual_url = ?14,
                end_of_service_date = ?15,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?16;",
            params![
                item.location_id.map(|id| id.to_string()),
                item.name.as_str(),
                item_status_to_db(item.status),
                item.quantity,
                item.area.as_deref(),
                item.brand.as_deref(),
                item.model_number.as_deref(),
                item.serial_number.as_deref(),
                item.purchase_value,
                item.purchase_place.as_deref(),
                item.purchase_year,
                date_to_db(item.warranty_expiration),
                item.notes.as_deref(),
                item.manual_url.as_deref(),
                date_to_db(item.end_of_service_date),
                item.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }

        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn list_items(&self, query: &ItemListQuery) -> RepoResult<Vec<Item>> {
        let mut sql = format!("{ITEM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(location) = query.location {
            sql.push_str(" AND location_uuid = ?");
            bind_values.push(Value::Text(location.to_string()));
        }

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Integer(item_status_to_db(status)));
        }

        sql.push_str(" ORDER BY name ASC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "items.uuid")?;

    let location_id = match row.get::<_, Option<String>>("location_uuid")? {
        Some(text) => Some(parse_uuid(&text, "items.location_uuid")?),
        None => None,
    };

    let status_value: i64 = row.get("status")?;
    let status = parse_item_status(status_value).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid item status `{status_value}` in items.status"
        ))
    })?;

    let item = Item {
        id,
        location_id,
        name: row.get("name")?,
        status,
        quantity: row.get("quantity")?,
        area: row.get("area")?,
        brand: row.get("brand")?,
        model_number: row.get("model_number")?,
        serial_number: row.get("serial_number")?,
        purchase_value: row.get("purchase_value")?,
        purchase_place: row.get("purchase_place")?,
        purchase_year: row.get("purchase_year")?,
        warranty_expiration: parse_date(
            row.get("warranty_expiration")?,
            "items.warranty_expiration",
        )?,
        notes: row.get("notes")?,
        manual_url: row.get("manual_url")?,
        end_of_service_date: parse_date(
            row.get("end_of_service_date")?,
            "items.end_of_service_date",
        )?,
    };
    item.validate()?;
    Ok(item)
}

fn item_status_to_db(status: ItemStatus) -> i64 {
    match status {
        ItemStatus::Active => 1,
        ItemStatus::Retired => 2,
        ItemStatus::Broken => 3,
    }
}

fn parse_item_status(value: i64) -> Option<ItemStatus> {
    match value {
        1 => Some(ItemStatus::Active),
        2 => Some(ItemStatus::Retired),
        3 => Some(ItemStatus::Broken),
        _ => None,
    }
}
