//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `tasks` storage, schedule and snooze
//!   columns included.
//! - Expose the item/location filters the engine's selectors query by.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - `update_task` rewrites the whole mutable row in one statement, so a
//!   complete/snooze field set lands atomically.
//! - `frequency_days` must map back onto the closed interval set; any
//!   other stored value is rejected on read.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::model::item::ItemId;
use crate::model::location::LocationId;
use crate::model::task::{Frequency, Task, TaskId};
use crate::repo::{date_to_db, ensure_connection_ready, parse_date, parse_uuid, RepoError, RepoResult};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    item_uuid,
    name,
    description,
    description_url,
    frequency_days,
    estimated_hours,
    last_performed,
    next_due_date,
    snoozed_until,
    snooze_count
FROM tasks";

const TASK_COLUMNS: &[&str] = &[
    "uuid",
    "item_uuid",
    "name",
    "description",
    "description_url",
    "frequency_days",
    "estimated_hours",
    "last_performed",
    "next_due_date",
    "snoozed_until",
    "snooze_count",
];

/// Query options for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    /// Restrict to one owning item when set.
    pub item: Option<ItemId>,
    /// Restrict to tasks whose item belongs to one location when set.
    pub location: Option<LocationId>,
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Persists every mutable field of the task in one statement.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists tasks in name order, id as tie-break.
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                item_uuid,
                name,
                description,
                description_url,
                frequency_days,
                estimated_hours,
                last_performed,
                next_due_date,
                snoozed_until,
                snooze_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                task.id.to_string(),
                task.item_id.to_string(),
                task.name.as_str(),
                task.description.as_deref(),
                task.description_url.as_deref(),
                task.frequency.days(),
                task.estimated_hours,
                date_to_db(task.last_performed),
                date_to_db(task.next_due_date),
                date_to_db(task.snoozed_until),
                task.snooze_count,
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                item_uuid = ?1,
                name = ?2,
                description = ?3,
                description_url = ?4,
                frequency_days = ?5,
                estimated_hours = ?6,
                last_performed = ?7,
                next_due_date = ?8,
                snoozed_until = ?9,
                snooze_count = ?10,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?11;",
            params![
                task.item_id.to_string(),
                task.name.as_str(),
                task.description.as_deref(),
                task.description_url.as_deref(),
                task.frequency.days(),
                task.estimated_hours,
                date_to_db(task.last_performed),
                date_to_db(task.next_due_date),
                date_to_db(task.snoozed_until),
                task.snooze_count,
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(item) = query.item {
            sql.push_str(" AND item_uuid = ?");
            bind_values.push(Value::Text(item.to_string()));
        }

        if let Some(location) = query.location {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1 FROM items
                    WHERE items.uuid = tasks.item_uuid
                      AND items.location_uuid = ?
                )",
            );
            bind_values.push(Value::Text(location.to_string()));
        }

        sql.push_str(" ORDER BY name ASC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "tasks.uuid")?;

    let item_text: String = row.get("item_uuid")?;
    let item_id = parse_uuid(&item_text, "tasks.item_uuid")?;

    let frequency_days: i64 = row.get("frequency_days")?;
    let frequency = Frequency::from_days(frequency_days).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid frequency value `{frequency_days}` in tasks.frequency_days"
        ))
    })?;

    let task = Task {
        id,
        item_id,
        name: row.get("name")?,
        description: row.get("description")?,
        description_url: row.get("description_url")?,
        frequency,
        estimated_hours: row.get("estimated_hours")?,
        last_performed: parse_date(row.get("last_performed")?, "tasks.last_performed")?,
        next_due_date: parse_date(row.get("next_due_date")?, "tasks.next_due_date")?,
        snoozed_until: parse_date(row.get("snoozed_until")?, "tasks.snoozed_until")?,
        snooze_count: row.get("snooze_count")?,
    };
    task.validate()?;
    Ok(task)
}
