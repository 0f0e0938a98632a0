use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::ValidationError;
use crate::format::parse_due_time;

/// Opaque task identifier assigned by the store.
///
/// Backed by a random UUID, so an id is never handed out twice even after the
/// task it named has been deleted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub(crate) fn generate() -> Self {
        TaskId(Uuid::new_v4())
    }

    /// First eight hex digits, enough to address a task from the CLI.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(TaskId)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

/// A single reminder as persisted in the task store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, immutable for the task's lifetime.
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due instant in milliseconds since the Unix epoch (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    /// `HH:MM` display hint; only present alongside `due_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    pub priority: Priority,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Reserved for reminder delivery; never set by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_sent: Option<bool>,
}

impl Task {
    /// Checks the invariants a stored record must hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(time) = &self.due_time {
            if time.len() != 5 {
                return Err(ValidationError::InvalidTime(time.clone()));
            }
            parse_due_time(time)?;
            if self.due_date.is_none() {
                return Err(ValidationError::TimeWithoutDate);
            }
        }
        Ok(())
    }
}

/// Caller-supplied fields for a new task, before validation.
///
/// `priority` is kept as raw text so an out-of-range value coming from a form
/// or the command line is rejected by the store rather than by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub priority: String,
    pub description: Option<String>,
    pub due_date: Option<i64>,
    pub due_time: Option<String>,
    pub category: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, priority: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            priority: priority.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due(mut self, due_date: i64, due_time: Option<&str>) -> Self {
        self.due_date = Some(due_date);
        self.due_time = due_time.map(str::to_string);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validates the fields and builds the record the store will persist.
    ///
    /// Text fields are trimmed; blank optional text is stored as absent.
    pub(crate) fn into_task(self, id: TaskId) -> Result<Task, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let priority: Priority = self.priority.trim().parse()?;
        let due_time = match self.due_time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => {
                if self.due_date.is_none() {
                    return Err(ValidationError::TimeWithoutDate);
                }
                Some(parse_due_time(t)?.format("%H:%M").to_string())
            }
            _ => None,
        };

        Ok(Task {
            id,
            title,
            description: non_blank(self.description),
            due_date: self.due_date,
            due_time,
            priority,
            completed: false,
            category: non_blank(self.category),
            reminder_sent: None,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_only_known_values() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(ValidationError::InvalidPriority("urgent".into()))
        );
        assert!("HIGH".parse::<Priority>().is_err());
    }

    #[test]
    fn new_task_trims_and_drops_blank_optionals() {
        let task = NewTask::new("  Buy milk ", "low")
            .description("   ")
            .category(" Errands ")
            .into_task(TaskId::generate())
            .unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);
        assert_eq!(task.category.as_deref(), Some("Errands"));
        assert!(!task.completed);
    }

    #[test]
    fn due_time_requires_due_date() {
        let mut fields = NewTask::new("Call", "medium");
        fields.due_time = Some("09:30".into());
        assert_eq!(
            fields.into_task(TaskId::generate()),
            Err(ValidationError::TimeWithoutDate)
        );
    }

    #[test]
    fn malformed_due_time_is_rejected() {
        let fields = NewTask::new("Call", "medium").due(0, Some("25:00"));
        assert_eq!(
            fields.into_task(TaskId::generate()),
            Err(ValidationError::InvalidTime("25:00".into()))
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let task = NewTask::new("Doctor", "high")
            .due(1_700_000_000_000, Some("13:05"))
            .into_task(TaskId::generate())
            .unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], 1_700_000_000_000i64);
        assert_eq!(json["dueTime"], "13:05");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["completed"], false);
        assert!(json.get("reminderSent").is_none());
    }

    #[test]
    fn record_without_completed_flag_is_rejected() {
        let raw = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","title":"x","priority":"low"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn short_id_is_eight_hex_digits() {
        let id = TaskId::generate();
        assert_eq!(id.short().len(), 8);
        assert!(id.to_string().replace('-', "").starts_with(&id.short()));
    }
}
