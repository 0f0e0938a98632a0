use crate::models::Task;

/// Whether `task` is past due at `now_ms` (epoch milliseconds).
///
/// A task is overdue only if it has a due date strictly before `now_ms` and
/// is not completed. Completed tasks are never overdue.
pub fn is_overdue(task: &Task, now_ms: i64) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < now_ms)
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.len() - completed_count(tasks)
}

pub fn overdue_count(tasks: &[Task], now_ms: i64) -> usize {
    tasks.iter().filter(|t| is_overdue(t, now_ms)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};

    fn task(due_date: Option<i64>, completed: bool) -> Task {
        Task {
            id: "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap(),
            title: "t".into(),
            description: None,
            due_date,
            due_time: None,
            priority: Priority::Medium,
            completed,
            category: None,
            reminder_sent: None,
        }
    }

    #[test]
    fn overdue_uses_strict_inequality() {
        let t = task(Some(1_000), false);
        assert!(!is_overdue(&t, 999));
        assert!(!is_overdue(&t, 1_000));
        assert!(is_overdue(&t, 1_001));
    }

    #[test]
    fn completed_task_is_never_overdue() {
        let t = task(Some(0), true);
        assert!(!is_overdue(&t, i64::MAX));
    }

    #[test]
    fn undated_task_is_never_overdue() {
        assert!(!is_overdue(&task(None, false), i64::MAX));
    }

    #[test]
    fn counts() {
        let tasks = vec![
            task(Some(10), false),
            task(Some(10), true),
            task(None, true),
            task(Some(50), false),
        ];
        assert_eq!(completed_count(&tasks), 2);
        assert_eq!(pending_count(&tasks), 2);
        assert_eq!(overdue_count(&tasks, 20), 1);
        assert_eq!(overdue_count(&tasks, 100), 2);
        assert_eq!(completed_count(&[]), 0);
    }
}
