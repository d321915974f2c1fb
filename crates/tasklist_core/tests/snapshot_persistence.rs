use chrono::{TimeZone, Utc};
use tasklist_core::db::open_db;
use tasklist_core::{
    KeyValueStore, KvSnapshotRepository, MemoryKeyValueStore, NewTask, Priority,
    SnapshotRepository, SqliteKeyValueStore, Task, TaskListStore, TaskUpdate, TASKS_STORAGE_KEY,
};
use uuid::Uuid;

fn sample_list() -> Vec<Task> {
    let mut done = Task::create_at(
        NewTask::new("Buy milk").with_priority(Priority::Low),
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    );
    done.completed = true;
    let open = Task::create(
        NewTask::new("Write report")
            .with_description("line one\nline \"two\"")
            .with_priority(Priority::High),
    );
    vec![open, done]
}

#[test]
fn load_of_save_returns_the_same_list() {
    let repo = KvSnapshotRepository::new(MemoryKeyValueStore::new());
    let list = sample_list();

    repo.save(&list).unwrap();

    assert_eq!(repo.load().unwrap(), list);
}

#[test]
fn round_trip_keeps_sub_millisecond_timestamps() {
    let repo = KvSnapshotRepository::new(MemoryKeyValueStore::new());
    let now_stamped = Task {
        created_at: Utc::now(),
        ..Task::create(NewTask::new("stamped by caller"))
    };
    let nanos_stamped = Task {
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789),
        ..Task::create(NewTask::new("nanosecond instant"))
    };
    let list = vec![now_stamped, nanos_stamped];

    repo.save(&list).unwrap();

    assert_eq!(repo.load().unwrap(), list);
    let raw = repo.storage().get(TASKS_STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("2024-05-01T10:00:00.123456789Z"), "raw: {raw}");
}

#[test]
fn load_without_snapshot_is_empty() {
    let repo = KvSnapshotRepository::new(MemoryKeyValueStore::new());
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn save_overwrites_previous_snapshot() {
    let repo = KvSnapshotRepository::new(MemoryKeyValueStore::new());
    repo.save(&sample_list()).unwrap();

    repo.save(&[]).unwrap();

    assert!(repo.load().unwrap().is_empty());
    assert_eq!(
        repo.storage().get(TASKS_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn snapshot_uses_expected_wire_fields() {
    let storage = MemoryKeyValueStore::new();
    let repo = KvSnapshotRepository::new(storage.clone());
    let task = Task {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        title: "Buy milk".to_string(),
        description: String::new(),
        priority: Priority::Low,
        completed: false,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    };

    repo.save(std::slice::from_ref(&task)).unwrap();

    let raw = storage.get(TASKS_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &json[0];
    assert_eq!(record["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(record["title"], "Buy milk");
    assert_eq!(record["description"], "");
    assert_eq!(record["priority"], "low");
    assert_eq!(record["completed"], false);
    assert_eq!(record["createdAt"], "2024-05-01T10:00:00.000Z");
    assert_eq!(record.as_object().unwrap().len(), 6);
}

#[test]
fn timestamps_with_offsets_load_as_the_same_instant() {
    let storage = MemoryKeyValueStore::new();
    storage
        .set(
            TASKS_STORAGE_KEY,
            r#"[{"id":"11111111-2222-4333-8444-555555555555","title":"t","description":"","priority":"medium","completed":true,"createdAt":"2024-05-01T12:00:00.250+02:00"}]"#,
        )
        .unwrap();

    let tasks = KvSnapshotRepository::new(storage).load().unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(
        tasks[0].created_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + chrono::Duration::milliseconds(250)
    );
    assert!(tasks[0].completed);
}

#[test]
fn corrupted_snapshot_falls_back_to_empty_list() {
    for corrupted in [
        "not json at all",
        "{\"id\": 1}",
        r#"[{"id":"11111111-2222-4333-8444-555555555555","title":"t","description":"","priority":"medium","completed":false,"createdAt":"yesterday"}]"#,
        r#"[{"title":"missing id"}]"#,
    ] {
        let storage = MemoryKeyValueStore::new();
        storage.set(TASKS_STORAGE_KEY, corrupted).unwrap();

        let store = TaskListStore::initialize(KvSnapshotRepository::new(storage.clone()));

        assert!(store.is_empty(), "expected empty list for `{corrupted}`");
        assert_eq!(
            storage.get(TASKS_STORAGE_KEY).unwrap().as_deref(),
            Some(corrupted),
            "load must not rewrite a corrupted snapshot"
        );
    }
}

#[test]
fn corrupted_snapshot_is_replaced_on_next_mutation() {
    let storage = MemoryKeyValueStore::new();
    storage.set(TASKS_STORAGE_KEY, "{broken").unwrap();
    let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage.clone()));

    store.add(NewTask::new("fresh start")).unwrap();

    let reloaded = KvSnapshotRepository::new(storage).load().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].title, "fresh start");
}

#[test]
fn custom_key_isolates_snapshots() {
    let storage = MemoryKeyValueStore::new();
    let default_repo = KvSnapshotRepository::new(storage.clone());
    let other_repo = KvSnapshotRepository::with_key(storage.clone(), "todos-archive");

    default_repo.save(&sample_list()).unwrap();

    assert!(other_repo.load().unwrap().is_empty());
    assert_eq!(storage.len(), 1);
}

#[test]
fn clear_removes_the_snapshot_key() {
    let storage = MemoryKeyValueStore::new();
    let repo = KvSnapshotRepository::new(storage.clone());
    repo.save(&sample_list()).unwrap();

    repo.clear().unwrap();

    assert!(storage.get(TASKS_STORAGE_KEY).unwrap().is_none());
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn store_state_survives_reopening_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let (milk_id, report_id) = {
        let conn = open_db(&path).unwrap();
        let storage = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut store = TaskListStore::initialize(KvSnapshotRepository::new(storage));
        let milk = store.add(NewTask::new("Buy milk")).unwrap();
        let report = store.add(NewTask::new("Write report")).unwrap();
        store.update(milk.id, TaskUpdate::completed(true)).unwrap();
        (milk.id, report.id)
    };

    let conn = open_db(&path).unwrap();
    let storage = SqliteKeyValueStore::try_new(&conn).unwrap();
    let store = TaskListStore::initialize(KvSnapshotRepository::new(storage));

    let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![report_id, milk_id]);
    assert!(store.get(milk_id).unwrap().completed);
    assert!(!store.get(report_id).unwrap().completed);
}
