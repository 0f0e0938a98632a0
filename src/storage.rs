use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::error::{Result, StoreFault, TaskError};
use crate::models::{NewTask, Task, TaskId};

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `REMINDME_DB` environment variable.
/// 2. `~/.local/share/remindme/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
pub fn default_db_path() -> PathBuf {
    std::env::var("REMINDME_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("remindme");
        p.push("tasks.json");
        p
    })
}

/// Returns a file path located in the same directory as the tasks database.
pub fn sibling_path(db_path: &Path, file_name: &str) -> PathBuf {
    let mut p = db_path.to_path_buf();
    p.pop();
    p.push(file_name);
    p
}

/// Reads and deserializes a JSON file.
///
/// Returns `Ok(None)` when the file does not exist. A file that exists but
/// cannot be read or parsed is an error, never an empty default.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(TaskError::store(path, e)),
    };
    let mut s = String::new();
    f.read_to_string(&mut s).map_err(|e| TaskError::store(path, e))?;
    serde_json::from_str(&s)
        .map(Some)
        .map_err(|e| TaskError::store(path, e))
}

/// Serializes `value` next to `path` and renames it into place, so readers
/// see either the old file or the new one.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(|e| TaskError::store(path, e))?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| TaskError::store(path, e))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let write = || -> std::io::Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)?;
        f.write_all(s.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp, path)
    };
    write().map_err(|e| {
        let _ = fs::remove_file(&tmp);
        TaskError::store(path, e)
    })
}

/// The persistent collection of tasks.
///
/// Records are kept in insertion order. Two secondary indexes, by completion
/// flag and by due date, are rebuilt after every mutation. Each mutation is
/// written through to disk before it returns; if the write fails the
/// in-memory collection is restored, so a failed call changes nothing.
#[derive(Debug)]
pub struct TaskStore {
    path: Option<PathBuf>,
    tasks: Vec<Task>,
    positions: HashMap<TaskId, usize>,
    by_completed: BTreeMap<bool, Vec<TaskId>>,
    by_due_date: BTreeMap<i64, Vec<TaskId>>,
}

impl TaskStore {
    /// Opens the JSON database at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks: Vec<Task> = read_json(&path)?.unwrap_or_default();
        check_records(&tasks).map_err(|msg| TaskError::store(&path, StoreFault::Invalid(msg)))?;
        debug!("event=store_open path={} tasks={}", path.display(), tasks.len());
        Ok(Self::with_tasks(Some(path), tasks))
    }

    /// Opens the database at [`default_db_path`].
    pub fn open_default() -> Result<Self> {
        Self::open(default_db_path())
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::with_tasks(None, Vec::new())
    }

    fn with_tasks(path: Option<PathBuf>, tasks: Vec<Task>) -> Self {
        let mut store = TaskStore {
            path,
            tasks,
            positions: HashMap::new(),
            by_completed: BTreeMap::new(),
            by_due_date: BTreeMap::new(),
        };
        store.reindex();
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All tasks in insertion order.
    pub fn list_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks whose `completed` flag equals `completed`, in insertion order.
    pub fn tasks_by_completed(&self, completed: bool) -> Vec<Task> {
        self.by_completed
            .get(&completed)
            .map(|ids| self.collect(ids.iter()))
            .unwrap_or_default()
    }

    /// Tasks with a due date, earliest first. Tasks without one are excluded.
    pub fn tasks_by_due_date(&self) -> Vec<Task> {
        self.collect(self.by_due_date.values().flatten())
    }

    pub fn get_task(&self, id: TaskId) -> Result<Task> {
        self.position(id).map(|i| self.tasks[i].clone())
    }

    /// Resolves a full id or a unique id prefix as typed on the command line.
    pub fn resolve_id(&self, input: &str) -> Result<TaskId> {
        let input = input.trim();
        if let Ok(id) = input.parse::<TaskId>() {
            return self.position(id).map(|_| id);
        }
        let needle = input.to_ascii_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(TaskError::UnknownId(input.to_string()));
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.to_string().replace('-', "").starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(t), None) => Ok(t.id),
            (Some(_), Some(_)) => Err(TaskError::AmbiguousId(input.to_string())),
            (None, _) => Err(TaskError::UnknownId(input.to_string())),
        }
    }

    /// Validates `fields`, assigns an id and `completed = false`, and persists
    /// the new task.
    pub fn create_task(&mut self, fields: NewTask) -> Result<Task> {
        let task = fields.into_task(self.fresh_id()).map_err(|e| {
            warn!("event=task_create status=rejected reason=\"{}\"", e);
            TaskError::from(e)
        })?;
        self.tasks.push(task.clone());
        if let Err(e) = self.commit() {
            self.tasks.pop();
            self.reindex();
            return Err(e);
        }
        info!("event=task_create status=ok id={} priority={}", task.id, task.priority);
        Ok(task)
    }

    /// Flips `completed` on the task with `id`.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<Task> {
        let i = self.position(id)?;
        self.tasks[i].completed = !self.tasks[i].completed;
        if let Err(e) = self.commit() {
            self.tasks[i].completed = !self.tasks[i].completed;
            self.reindex();
            return Err(e);
        }
        let task = self.tasks[i].clone();
        info!("event=task_toggle status=ok id={} completed={}", id, task.completed);
        Ok(task)
    }

    /// Removes the task permanently. Deleting an id twice is an error.
    pub fn delete_task(&mut self, id: TaskId) -> Result<()> {
        let i = self.position(id)?;
        let removed = self.tasks.remove(i);
        if let Err(e) = self.commit() {
            self.tasks.insert(i, removed);
            self.reindex();
            return Err(e);
        }
        info!("event=task_delete status=ok id={}", id);
        Ok(())
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.positions.get(&id).copied().ok_or_else(|| {
            debug!("event=task_lookup status=not_found id={}", id);
            TaskError::NotFound(id)
        })
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if !self.positions.contains_key(&id) {
                return id;
            }
        }
    }

    fn collect<'a>(&self, ids: impl Iterator<Item = &'a TaskId>) -> Vec<Task> {
        ids.filter_map(|id| self.positions.get(id))
            .map(|&i| self.tasks[i].clone())
            .collect()
    }

    fn commit(&mut self) -> Result<()> {
        self.reindex();
        match &self.path {
            Some(path) => write_json_atomic(path, &self.tasks),
            None => Ok(()),
        }
    }

    fn reindex(&mut self) {
        self.positions.clear();
        self.by_completed.clear();
        self.by_due_date.clear();
        for (i, t) in self.tasks.iter().enumerate() {
            self.positions.insert(t.id, i);
            self.by_completed.entry(t.completed).or_default().push(t.id);
            if let Some(due) = t.due_date {
                self.by_due_date.entry(due).or_default().push(t.id);
            }
        }
    }
}

fn check_records(tasks: &[Task]) -> std::result::Result<(), String> {
    let mut seen = HashMap::new();
    for (i, t) in tasks.iter().enumerate() {
        t.validate().map_err(|e| format!("task {}: {}", t.id, e))?;
        if let Some(prev) = seen.insert(t.id, i) {
            return Err(format!("duplicate id {} at records {} and {}", t.id, prev, i));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(store: &mut TaskStore, title: &str, due: Option<i64>) -> Task {
        let mut fields = NewTask::new(title, "medium");
        fields.due_date = due;
        store.create_task(fields).unwrap()
    }

    #[test]
    fn due_date_index_is_sorted_and_skips_undated() {
        let mut store = TaskStore::in_memory();
        let late = sample(&mut store, "late", Some(300));
        let none = sample(&mut store, "undated", None);
        let early = sample(&mut store, "early", Some(100));
        let tie = sample(&mut store, "tie", Some(100));

        let ordered: Vec<TaskId> = store.tasks_by_due_date().iter().map(|t| t.id).collect();
        assert_eq!(ordered, vec![early.id, tie.id, late.id]);
        assert!(!ordered.contains(&none.id));
    }

    #[test]
    fn completed_index_follows_toggles() {
        let mut store = TaskStore::in_memory();
        let a = sample(&mut store, "a", None);
        let b = sample(&mut store, "b", None);
        store.toggle_completed(b.id).unwrap();

        let done: Vec<TaskId> = store.tasks_by_completed(true).iter().map(|t| t.id).collect();
        let open: Vec<TaskId> = store.tasks_by_completed(false).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![b.id]);
        assert_eq!(open, vec![a.id]);
    }

    #[test]
    fn delete_keeps_indexes_consistent() {
        let mut store = TaskStore::in_memory();
        let a = sample(&mut store, "a", Some(5));
        let b = sample(&mut store, "b", Some(1));
        store.delete_task(b.id).unwrap();

        assert_eq!(store.get_task(a.id).unwrap().title, "a");
        assert_eq!(store.tasks_by_due_date().len(), 1);
        assert!(matches!(store.get_task(b.id), Err(TaskError::NotFound(id)) if id == b.id));
    }

    #[test]
    fn resolves_unique_prefixes() {
        let mut store = TaskStore::in_memory();
        let a = sample(&mut store, "a", None);
        assert_eq!(store.resolve_id(&a.id.short()).unwrap(), a.id);
        assert_eq!(store.resolve_id(&a.id.to_string()).unwrap(), a.id);
        assert!(matches!(store.resolve_id(""), Err(TaskError::UnknownId(_))));
        assert!(matches!(store.resolve_id("zzzz"), Err(TaskError::UnknownId(_))));
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        let record = |id: &str, title: &str| Task {
            id: id.parse().unwrap(),
            title: title.into(),
            description: None,
            due_date: None,
            due_time: None,
            priority: crate::models::Priority::Low,
            completed: false,
            category: None,
            reminder_sent: None,
        };
        let store = TaskStore::with_tasks(
            None,
            vec![
                record("abcd0000-0000-4000-8000-000000000001", "one"),
                record("abcd0000-0000-4000-8000-000000000002", "two"),
            ],
        );
        assert!(matches!(store.resolve_id("abcd"), Err(TaskError::AmbiguousId(_))));
        assert_eq!(
            store.resolve_id("abcd0000000040008000000000000002").unwrap().to_string(),
            "abcd0000-0000-4000-8000-000000000002"
        );
    }
}
