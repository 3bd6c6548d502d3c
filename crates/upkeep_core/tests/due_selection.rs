use chrono::NaiveDate;
use rusqlite::Connection;
use upkeep_core::db::open_db_in_memory;
use upkeep_core::{
    resolve_active_location, DashboardService, Frequency, Item, ItemRepository, Location,
    LocationRepository, SqliteItemRepository, SqliteLocationRepository, SqliteTaskRepository,
    Task, TaskRepository,
};

#[test]
fn due_list_orders_by_effective_date_descending_then_name() {
    let conn = open_db_in_memory().unwrap();
    let (location, item) = seeded_location(&conn, "Home");
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let mut oldest = Task::new(item.id, "Bleed radiators", Frequency::Yearly);
    oldest.next_due_date = Some(date(2025, 3, 1));
    let mut mid_b = Task::new(item.id, "Belt check", Frequency::Monthly);
    mid_b.next_due_date = Some(date(2025, 3, 10));
    let mut mid_a = Task::new(item.id, "Air filter", Frequency::Monthly);
    mid_a.next_due_date = Some(date(2025, 3, 10));
    let mut newest = Task::new(item.id, "Zone valve test", Frequency::Quarterly);
    newest.next_due_date = Some(date(2025, 3, 15));
    for task in [&oldest, &mid_b, &mid_a, &newest] {
        tasks.create_task(task).unwrap();
    }

    let service = dashboard_service(&conn);
    let view = service.due_list(location.id, date(2025, 3, 15)).unwrap();

    let names: Vec<_> = view.tasks.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(
        names,
        ["Zone valve test", "Air filter", "Belt check", "Bleed radiators"]
    );
}

#[test]
fn due_list_hides_snoozed_tasks_until_the_floor_passes() {
    let conn = open_db_in_memory().unwrap();
    let (location, item) = seeded_location(&conn, "Home");
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let mut shielded = Task::new(item.id, "Clean gutters", Frequency::Quarterly);
    shielded.next_due_date = Some(date(2025, 3, 1));
    shielded.snoozed_until = Some(date(2025, 3, 20));
    shielded.snooze_count = 1;
    tasks.create_task(&shielded).unwrap();

    let mut expired = Task::new(item.id, "Flush boiler", Frequency::Yearly);
    expired.next_due_date = Some(date(2025, 2, 1));
    expired.snoozed_until = Some(date(2025, 3, 10));
    expired.snooze_count = 2;
    tasks.create_task(&expired).unwrap();

    let service = dashboard_service(&conn);

    let before = service.due_list(location.id, date(2025, 3, 15)).unwrap();
    let names: Vec<_> = before.tasks.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["Flush boiler"]);

    let after = service.due_list(location.id, date(2025, 3, 20)).unwrap();
    let names: Vec<_> = after.tasks.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["Clean gutters", "Flush boiler"]);
}

#[test]
fn due_list_scopes_to_the_requested_location() {
    let conn = open_db_in_memory().unwrap();
    let (home, home_item) = seeded_location(&conn, "Home");
    let (_, cabin_item) = seeded_location(&conn, "Cabin");
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let mut home_task = Task::new(home_item.id, "Test smoke detector", Frequency::Monthly);
    home_task.next_due_date = Some(date(2025, 3, 1));
    tasks.create_task(&home_task).unwrap();

    let mut cabin_task = Task::new(cabin_item.id, "Air out mattresses", Frequency::Monthly);
    cabin_task.next_due_date = Some(date(2025, 3, 1));
    tasks.create_task(&cabin_task).unwrap();

    let service = dashboard_service(&conn);
    let view = service.due_list(home.id, date(2025, 3, 15)).unwrap();

    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].id, home_task.id);
}

#[test]
fn unscheduled_and_future_tasks_never_appear() {
    let conn = open_db_in_memory().unwrap();
    let (location, item) = seeded_location(&conn, "Home");
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let unscheduled = Task::new(item.id, "Oil hinges", Frequency::Yearly);
    tasks.create_task(&unscheduled).unwrap();

    let mut future = Task::new(item.id, "Service heat pump", Frequency::Yearly);
    future.next_due_date = Some(date(2025, 9, 1));
    tasks.create_task(&future).unwrap();

    let service = dashboard_service(&conn);
    let view = service.due_list(location.id, date(2025, 3, 15)).unwrap();

    assert!(view.tasks.is_empty());
}

#[test]
fn default_location_drives_the_due_list_when_nothing_is_selected() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();
    let items = SqliteItemRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let rental = Location::new("Rental flat");
    let mut home = Location::new("Home");
    home.is_default = true;
    locations.create_location(&rental).unwrap();
    locations.create_location(&home).unwrap();

    let item = Item::new(home.id, "Boiler");
    items.create_item(&item).unwrap();
    let mut task = Task::new(item.id, "Check pressure", Frequency::Weekly);
    task.next_due_date = Some(date(2025, 3, 10));
    tasks.create_task(&task).unwrap();

    let listed = locations.list_locations().unwrap();
    let active = resolve_active_location(None, &listed).unwrap();
    assert_eq!(active.id, home.id);

    let service = dashboard_service(&conn);
    let view = service.due_list(active.id, date(2025, 3, 15)).unwrap();
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].id, task.id);
}

#[test]
fn explicit_selection_overrides_the_default_location() {
    let conn = open_db_in_memory().unwrap();
    let locations = SqliteLocationRepository::try_new(&conn).unwrap();

    let mut home = Location::new("Home");
    home.is_default = true;
    let cabin = Location::new("Cabin");
    locations.create_location(&home).unwrap();
    locations.create_location(&cabin).unwrap();

    let listed = locations.list_locations().unwrap();
    let active = resolve_active_location(Some(cabin.id), &listed).unwrap();
    assert_eq!(active.id, cabin.id);
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dashboard_service(
    conn: &Connection,
) -> DashboardService<SqliteItemRepository<'_>, SqliteTaskRepository<'_>> {
    DashboardService::new(
        SqliteItemRepository::try_new(conn).unwrap(),
        SqliteTaskRepository::try_new(conn).unwrap(),
    )
}

fn seeded_location(conn: &Connection, name: &str) -> (Location, Item) {
    let locations = SqliteLocationRepository::try_new(conn).unwrap();
    let items = SqliteItemRepository::try_new(conn).unwrap();

    let location = Location::new(name);
    locations.create_location(&location).unwrap();
    let item = Item::new(location.id, format!("{name} systems"));
    items.create_item(&item).unwrap();

    (location, item)
}
