use std::path::PathBuf;
use remindme::commands::*;
use remindme::config::Settings;
use remindme::derived::completed_count;
use remindme::error::{TaskError, ValidationError};
use remindme::models::Priority;
use remindme::rewards::{current_level, Progress, catalog};
use remindme::storage::TaskStore;
use remindme::theme::Theme;
use tempfile::TempDir;

struct TestDb {
    _dir: TempDir,
    db_path: PathBuf,
    settings_path: PathBuf,
}

fn with_test_db<F>(f: F)
where
    F: FnOnce(&TestDb, TaskStore),
{
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tasks.json");
    let settings_path = Settings::path_for(&db_path);
    let store = TaskStore::open(&db_path).unwrap();
    let db = TestDb { _dir: dir, db_path, settings_path };
    f(&db, store);
}

fn add(store: &mut TaskStore, title: &str, priority: &str) -> remindme::models::Task {
    let args = AddArgs {
        title: Some(title.into()),
        priority: Some(priority.into()),
        ..Default::default()
    };
    cmd_add(store, Theme::Normal, args, true).unwrap()
}

#[test]
fn test_buy_milk_end_to_end() {
    with_test_db(|_db, mut store| {
        let task = add(&mut store, "Buy milk", "low");

        let listed = store.list_tasks();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Buy milk");
        assert!(!listed[0].completed);

        cmd_toggle(&mut store, Theme::Normal, &task.id.to_string(), true).unwrap();
        let count = completed_count(&store.list_tasks());
        assert_eq!(count, 1);
        assert_eq!(current_level(count, 8), 1);

        cmd_toggle(&mut store, Theme::Normal, &task.id.short(), true).unwrap();
        assert_eq!(completed_count(&store.list_tasks()), 0);
    });
}

#[test]
fn test_add_with_due_date_and_time() {
    with_test_db(|_db, mut store| {
        let args = AddArgs {
            title: Some("Dentist".into()),
            due: Some("2025-12-01".into()),
            at: Some("09:15".into()),
            category: Some("Health".into()),
            ..Default::default()
        };
        let task = cmd_add(&mut store, Theme::Horror, args, true).unwrap();
        assert!(task.due_date.is_some());
        assert_eq!(task.due_time.as_deref(), Some("09:15"));
        assert_eq!(task.priority, Priority::Medium);
        assert!(describe_due(&task).unwrap().ends_with("at 9:15 AM"));
    });
}

#[test]
fn test_add_rejects_time_without_date() {
    with_test_db(|_db, mut store| {
        let args = AddArgs {
            title: Some("Nap".into()),
            at: Some("14:00".into()),
            ..Default::default()
        };
        let err = cmd_add(&mut store, Theme::Normal, args, true).unwrap_err();
        assert!(matches!(err, TaskError::Validation(ValidationError::TimeWithoutDate)));
        assert!(store.is_empty());
    });
}

#[test]
fn test_add_rejects_bad_date() {
    with_test_db(|_db, mut store| {
        let args = AddArgs {
            title: Some("Nap".into()),
            due: Some("tomorrow".into()),
            ..Default::default()
        };
        let err = cmd_add(&mut store, Theme::Normal, args, true).unwrap_err();
        assert!(matches!(err, TaskError::Validation(ValidationError::InvalidDate(_))));
    });
}

#[test]
fn test_template_fills_missing_fields() {
    with_test_db(|_db, mut store| {
        let args = AddArgs {
            template: Some("work".into()),
            priority: Some("low".into()),
            ..Default::default()
        };
        let task = cmd_add(&mut store, Theme::Normal, args, true).unwrap();
        assert_eq!(task.title, "Work meeting");
        assert_eq!(task.category.as_deref(), Some("Work"));
        // Explicit flags win over the template.
        assert_eq!(task.priority, Priority::Low);

        let unknown = AddArgs { template: Some("nope".into()), ..Default::default() };
        assert!(matches!(
            cmd_add(&mut store, Theme::Normal, unknown, true),
            Err(TaskError::UnknownTemplate(_))
        ));
    });
}

#[test]
fn test_remove_twice_is_an_error() {
    with_test_db(|_db, mut store| {
        let task = add(&mut store, "Temp", "low");
        let id = task.id.to_string();
        cmd_remove(&mut store, Theme::Normal, &id, true).unwrap();
        assert!(matches!(
            cmd_remove(&mut store, Theme::Normal, &id, true),
            Err(TaskError::NotFound(_))
        ));
        assert!(matches!(
            cmd_toggle(&mut store, Theme::Normal, "ffffffff-ffff-4fff-bfff-ffffffffffff", true),
            Err(TaskError::NotFound(_))
        ));
    });
}

#[test]
fn test_claim_requires_unlocked_reward() {
    with_test_db(|_db, mut store| {
        let settings = Settings { partner_name: "Sam".into(), ..Default::default() };
        for i in 0..4 {
            let t = add(&mut store, &format!("chore {i}"), "medium");
            cmd_toggle(&mut store, Theme::Normal, &t.id.to_string(), true).unwrap();
        }
        let progress = Progress::from_tasks(&store.list_tasks(), catalog());
        assert_eq!(progress.level, 3);

        let msg = cmd_claim(&store, &settings, "bhel", 0, true).unwrap();
        assert!(msg.contains("Sam"));
        assert!(msg.contains("Home Made Bhel"));

        assert!(matches!(
            cmd_claim(&store, &settings, "chaat", 0, true),
            Err(TaskError::RewardLocked { required: 4, level: 3, .. })
        ));
        assert!(matches!(
            cmd_claim(&store, &settings, "caviar", 0, true),
            Err(TaskError::UnknownReward(_))
        ));
    });
}

#[test]
fn test_deleting_completed_task_lowers_level() {
    with_test_db(|_db, mut store| {
        let a = add(&mut store, "a", "low");
        let b = add(&mut store, "b", "low");
        cmd_toggle(&mut store, Theme::Normal, &a.id.to_string(), true).unwrap();
        cmd_toggle(&mut store, Theme::Normal, &b.id.to_string(), true).unwrap();
        assert_eq!(Progress::from_tasks(&store.list_tasks(), catalog()).level, 2);

        cmd_remove(&mut store, Theme::Normal, &b.id.to_string(), true).unwrap();
        assert_eq!(Progress::from_tasks(&store.list_tasks(), catalog()).level, 1);
    });
}

#[test]
fn test_calendar_state_is_persisted() {
    with_test_db(|db, _store| {
        let mut settings = Settings::load(&db.settings_path).unwrap();
        assert!(!cmd_calendar(&mut settings, &db.settings_path, CalendarAction::Status, true).unwrap());
        assert!(cmd_calendar(&mut settings, &db.settings_path, CalendarAction::Connect, true).unwrap());
        assert!(Settings::load(&db.settings_path).unwrap().calendar_connected);

        let mut settings = Settings::load(&db.settings_path).unwrap();
        assert!(!cmd_calendar(&mut settings, &db.settings_path, CalendarAction::Disconnect, true).unwrap());
        assert!(!Settings::load(&db.settings_path).unwrap().calendar_connected);
    });
}

#[test]
fn test_theme_switch_is_persisted() {
    with_test_db(|db, _store| {
        let mut settings = Settings::load(&db.settings_path).unwrap();
        assert_eq!(settings.theme, Theme::Normal);
        assert_eq!(cmd_theme(&mut settings, &db.settings_path, None, true).unwrap(), Theme::Horror);
        assert_eq!(Settings::load(&db.settings_path).unwrap().theme, Theme::Horror);
        cmd_theme(&mut settings, &db.settings_path, Some(Theme::Normal), true).unwrap();
        assert_eq!(Settings::load(&db.settings_path).unwrap().theme, Theme::Normal);
        assert!(db.db_path.parent().unwrap().join("settings.json").exists());
    });
}

#[test]
fn test_task_table_marks_overdue_rows() {
    with_test_db(|_db, mut store| {
        let args = AddArgs {
            title: Some("Late".into()),
            due: Some("2000-01-01".into()),
            ..Default::default()
        };
        cmd_add(&mut store, Theme::Normal, args, true).unwrap();
        add(&mut store, "Undated", "high");

        let rendered = task_table(&store.list_tasks(), Theme::Normal, now_ms(), false).to_string();
        assert!(rendered.contains("Overdue"));
        assert!(rendered.contains("Pending"));
        assert!(rendered.contains("HIGH"));
        assert!(!rendered.contains("Description"));
    });
}

#[test]
fn test_verbose_table_shows_descriptions() {
    with_test_db(|_db, mut store| {
        let args = AddArgs {
            title: Some("Dentist".into()),
            description: Some("Bring the insurance card".into()),
            ..Default::default()
        };
        cmd_add(&mut store, Theme::Normal, args, true).unwrap();

        let rendered = task_table(&store.list_tasks(), Theme::Normal, now_ms(), true).to_string();
        assert!(rendered.contains("Description"));
        assert!(rendered.contains("insurance"));
    });
}
