use chrono::NaiveDate;
use rusqlite::Connection;
use upkeep_core::db::migrations::latest_version;
use upkeep_core::db::open_db_in_memory;
use upkeep_core::{
    Frequency, Item, ItemListQuery, ItemRepository, ItemStatus, Location, LocationRepository,
    RepoError, SqliteItemRepository, SqliteLocationRepository, SqliteTaskRepository, Task,
    TaskListQuery, TaskRepository,
};
use uuid::Uuid;

#[test]
fn location_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLocationRepository::try_new(&conn).unwrap();

    let mut location = Location::new("Summer cabin");
    location.address = Some("Lakeside road 4".to_string());
    location.zip_code = Some("79822".to_string());
    location.city = Some("Titisee".to_string());
    location.country_code = Some("DE".to_string());
    location.is_default = true;
    let id = repo.create_location(&location).unwrap();

    let loaded = repo.get_location(id).unwrap().unwrap();
    assert_eq!(loaded, location);
}

#[test]
fn location_list_orders_default_first_then_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLocationRepository::try_new(&conn).unwrap();

    let mut main = Location::new("Main house");
    main.is_default = true;
    let annex = Location::new("Annex");
    let garage = Location::new("Garage");
    repo.create_location(&garage).unwrap();
    repo.create_location(&main).unwrap();
    repo.create_location(&annex).unwrap();

    let listed = repo.list_locations().unwrap();
    let names: Vec<_> = listed.iter().map(|location| location.name.as_str()).collect();
    assert_eq!(names, ["Main house", "Annex", "Garage"]);
}

#[test]
fn item_create_and_get_roundtrip_preserves_all_metadata() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let location = Location::new("Home");
    locations.create_location(&location).unwrap();

    let mut item = Item::new(location.id, "Heat pump");
    item.status = ItemStatus::Broken;
    item.quantity = 2;
    item.area = Some("Utility room".to_string());
    item.brand = Some("Vaillant".to_string());
    item.model_number = Some("aroTHERM plus".to_string());
    item.serial_number = Some("21164500100".to_string());
    item.purchase_value = Some(11500);
    item.purchase_place = Some("Local installer".to_string());
    item.purchase_year = Some(2022);
    item.warranty_expiration = NaiveDate::from_ymd_opt(2027, 5, 31);
    item.notes = Some("Outdoor unit on north wall".to_string());
    item.manual_url = Some("https://example.com/manual.pdf".to_string());
    item.end_of_service_date = NaiveDate::from_ymd_opt(2037, 1, 1);
    let id = items.create_item(&item).unwrap();

    let loaded = items.get_item(id).unwrap().unwrap();
    assert_eq!(loaded, item);
}

#[test]
fn item_update_rewrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let location = Location::new("Home");
    locations.create_location(&location).unwrap();

    let mut item = Item::new(location.id, "Dishwasher");
    items.create_item(&item).unwrap();

    item.name = "Dishwasher (kitchen)".to_string();
    item.status = ItemStatus::Retired;
    item.area = Some("Kitchen".to_string());
    item.purchase_year = Some(2018);
    items.update_item(&item).unwrap();

    let loaded = items.get_item(item.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Dishwasher (kitchen)");
    assert_eq!(loaded.status, ItemStatus::Retired);
    assert_eq!(loaded.area.as_deref(), Some("Kitchen"));
    assert_eq!(loaded.purchase_year, Some(2018));
}

#[test]
fn update_missing_item_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let location = Location::new("Home");
    locations.create_location(&location).unwrap();

    let item = Item::new(location.id, "Ghost");
    let err = items.update_item(&item).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == item.id));
}

#[test]
fn list_items_filters_by_location_and_status() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let home = Location::new("Home");
    let cabin = Location::new("Cabin");
    locations.create_location(&home).unwrap();
    locations.create_location(&cabin).unwrap();

    let fridge = Item::new(home.id, "Fridge");
    let mut boiler = Item::new(home.id, "Boiler");
    boiler.status = ItemStatus::Broken;
    let sauna = Item::new(cabin.id, "Sauna heater");
    items.create_item(&fridge).unwrap();
    items.create_item(&boiler).unwrap();
    items.create_item(&sauna).unwrap();

    let home_query = ItemListQuery {
        location: Some(home.id),
        ..ItemListQuery::default()
    };
    let home_items = items.list_items(&home_query).unwrap();
    assert_eq!(home_items.len(), 2);
    assert_eq!(home_items[0].name, "Boiler");
    assert_eq!(home_items[1].name, "Fridge");

    let broken_query = ItemListQuery {
        location: Some(home.id),
        status: Some(ItemStatus::Broken),
    };
    let broken = items.list_items(&broken_query).unwrap();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].id, boiler.id);

    let everything = items.list_items(&ItemListQuery::default()).unwrap();
    assert_eq!(everything.len(), 3);
}

#[test]
fn task_create_and_get_roundtrip_preserves_schedule_fields() {
    let conn = open_db_in_memory().unwrap();
    let (_, item, tasks) = seeded_item(&conn);

    let mut task = Task::new(item.id, "Replace anode rod", Frequency::Yearly);
    task.description = Some(
        "## Tools & Parts\n- socket wrench\n\n## Steps\n1. Close inlet valve".to_string(),
    );
    task.description_url = Some("https://example.com/howto".to_string());
    task.estimated_hours = Some(3);
    task.last_performed = NaiveDate::from_ymd_opt(2024, 10, 1);
    task.next_due_date = NaiveDate::from_ymd_opt(2025, 10, 1);
    task.snoozed_until = NaiveDate::from_ymd_opt(2025, 10, 8);
    task.snooze_count = 1;
    let id = tasks.create_task(&task).unwrap();

    let loaded = tasks.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[test]
fn update_missing_task_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (_, item, tasks) = seeded_item(&conn);

    let task = Task::new(item.id, "Ghost", Frequency::Weekly);
    let err = tasks.update_task(&task).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));
}

#[test]
fn delete_missing_task_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (_, _, tasks) = seeded_item(&conn);

    let missing = Uuid::new_v4();
    let err = tasks.delete_task(missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn list_tasks_filters_by_item_and_location() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let home = Location::new("Home");
    let cabin = Location::new("Cabin");
    locations.create_location(&home).unwrap();
    locations.create_location(&cabin).unwrap();

    let boiler = Item::new(home.id, "Boiler");
    let sauna = Item::new(cabin.id, "Sauna heater");
    items.create_item(&boiler).unwrap();
    items.create_item(&sauna).unwrap();

    let flush = Task::new(boiler.id, "Flush tank", Frequency::Yearly);
    let inspect = Task::new(boiler.id, "Inspect valve", Frequency::Quarterly);
    let stones = Task::new(sauna.id, "Check stones", Frequency::Monthly);
    tasks.create_task(&flush).unwrap();
    tasks.create_task(&inspect).unwrap();
    tasks.create_task(&stones).unwrap();

    let boiler_query = TaskListQuery {
        item: Some(boiler.id),
        ..TaskListQuery::default()
    };
    let boiler_tasks = tasks.list_tasks(&boiler_query).unwrap();
    assert_eq!(boiler_tasks.len(), 2);
    assert_eq!(boiler_tasks[0].name, "Flush tank");
    assert_eq!(boiler_tasks[1].name, "Inspect valve");

    let cabin_query = TaskListQuery {
        location: Some(cabin.id),
        ..TaskListQuery::default()
    };
    let cabin_tasks = tasks.list_tasks(&cabin_query).unwrap();
    assert_eq!(cabin_tasks.len(), 1);
    assert_eq!(cabin_tasks[0].id, stones.id);
}

#[test]
fn deleting_an_item_cascades_to_its_tasks() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let home = Location::new("Home");
    locations.create_location(&home).unwrap();
    let boiler = Item::new(home.id, "Boiler");
    items.create_item(&boiler).unwrap();
    let flush = Task::new(boiler.id, "Flush tank", Frequency::Yearly);
    tasks.create_task(&flush).unwrap();

    items.delete_item(boiler.id).unwrap();

    assert!(items.get_item(boiler.id).unwrap().is_none());
    assert!(tasks.get_task(flush.id).unwrap().is_none());
}

#[test]
fn deleting_a_location_detaches_items_instead_of_cascading() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();

    let cabin = Location::new("Cabin");
    locations.create_location(&cabin).unwrap();
    let sauna = Item::new(cabin.id, "Sauna heater");
    items.create_item(&sauna).unwrap();

    locations.delete_location(cabin.id).unwrap();

    let detached = items.get_item(sauna.id).unwrap().unwrap();
    assert_eq!(detached.location_id, None);
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let (_, item, tasks) = seeded_item(&conn);

    let mut invalid = Task::new(item.id, "Descale", Frequency::Quarterly);
    invalid.description = Some("## Tools & Parts\n- vinegar".to_string());

    let create_err = tasks.create_task(&invalid).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let mut valid = Task::new(item.id, "Descale", Frequency::Quarterly);
    tasks.create_task(&valid).unwrap();

    valid.name = "   ".to_string();
    let update_err = tasks.update_task(&valid).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));
}

#[test]
fn malformed_persisted_rows_surface_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let (_, item, tasks) = seeded_item(&conn);

    let bad_frequency = Uuid::new_v4();
    conn.execute(
        "INSERT INTO tasks (uuid, item_uuid, name, frequency_days)
         VALUES (?1, ?2, 'Odd cadence', 11);",
        [bad_frequency.to_string(), item.id.to_string()],
    )
    .unwrap();

    let err = tasks.get_task(bad_frequency).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref details) if details.contains("frequency")));

    let bad_date = Uuid::new_v4();
    conn.execute(
        "INSERT INTO tasks (uuid, item_uuid, name, frequency_days, next_due_date)
         VALUES (?1, ?2, 'Bad date', 7, 'not-a-date');",
        [bad_date.to_string(), item.id.to_string()],
    )
    .unwrap();

    let err = tasks.get_task(bad_date).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref details) if details.contains("next_due_date")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn repository_rejects_connection_missing_snooze_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
            uuid TEXT PRIMARY KEY NOT NULL,
            item_uuid TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            description_url TEXT,
            frequency_days INTEGER NOT NULL,
            estimated_hours INTEGER,
            last_performed TEXT,
            next_due_date TEXT
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "tasks",
            column: "snoozed_until"
        })
    ));
}

fn seeded_item(conn: &Connection) -> (Location, Item, SqliteTaskRepository<'_>) {
    let locations = SqliteLocationRepository::try_new(conn).unwrap();
    let items = SqliteItemRepository::try_new(conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(conn).unwrap();

    let location = Location::new("Home");
    locations.create_location(&location).unwrap();
    let item = Item::new(location.id, "Water heater");
    items.create_item(&item).unwrap();

    (location, item, tasks)
}
