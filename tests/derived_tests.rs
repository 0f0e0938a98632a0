use remindme::derived::{completed_count, is_overdue};
use remindme::format::{format_due_time, due_timestamp};
use remindme::models::NewTask;
use remindme::rewards::{catalog, current_level, unlocked_rewards};
use remindme::storage::TaskStore;
use chrono::Utc;

#[test]
fn test_level_examples() {
    assert_eq!(current_level(0, 8), 1);
    assert_eq!(current_level(14, 8), 8);
    assert_eq!(current_level(4, 8), 3);
    assert_eq!(current_level(4, catalog().len() as u32), 3);
}

#[test]
fn test_time_formatting_examples() {
    assert_eq!(format_due_time("00:00").unwrap(), "12:00 AM");
    assert_eq!(format_due_time("13:05").unwrap(), "1:05 PM");
    assert_eq!(format_due_time("12:00").unwrap(), "12:00 PM");
}

#[test]
fn test_overdue_on_stored_tasks() {
    let mut store = TaskStore::in_memory();
    let due = due_timestamp("2024-01-15", Some("13:05"), &Utc).unwrap();
    let task = store.create_task(NewTask::new("Report", "high").due(due, Some("13:05"))).unwrap();

    assert!(!is_overdue(&task, due));
    assert!(is_overdue(&task, due + 1));

    let done = store.toggle_completed(task.id).unwrap();
    assert!(!is_overdue(&done, due + 1));
    assert!(!is_overdue(&done, i64::MAX));
}

#[test]
fn test_rewards_follow_completed_count() {
    let mut store = TaskStore::in_memory();
    for i in 0..6 {
        let t = store.create_task(NewTask::new(format!("t{i}"), "low")).unwrap();
        if i % 2 == 0 {
            store.toggle_completed(t.id).unwrap();
        }
    }
    let count = completed_count(&store.list_tasks());
    assert_eq!(count, 3);
    let level = current_level(count, 8);
    assert_eq!(level, 2);
    assert_eq!(unlocked_rewards(level, catalog()).len(), 2);
}
