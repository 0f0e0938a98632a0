use crate::models::{NewTask, Priority};

/// A built-in starting point for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
    pub category: &'static str,
    pub emoji: &'static str,
}

impl TaskTemplate {
    /// Task fields pre-filled from the template.
    pub fn to_new_task(&self) -> NewTask {
        NewTask::new(self.title, self.priority.as_str())
            .description(self.description)
            .category(self.category)
    }
}

const TEMPLATES: [TaskTemplate; 10] = [
    TaskTemplate { id: "friends", title: "Going out with friends", description: "Plan the perfect night out with your besties! 💃🕺", priority: Priority::Medium, category: "Social", emoji: "👯" },
    TaskTemplate { id: "work", title: "Work meeting", description: "Important team discussion and collaboration", priority: Priority::High, category: "Work", emoji: "💼" },
    TaskTemplate { id: "shopping", title: "Shopping trip", description: "Retail therapy time! Find some amazing deals", priority: Priority::Low, category: "Personal", emoji: "🛍️" },
    TaskTemplate { id: "exercise", title: "Workout session", description: "Time to get those endorphins flowing! 💪", priority: Priority::Medium, category: "Health", emoji: "🏋️" },
    TaskTemplate { id: "date", title: "Date night", description: "Romantic evening with your special someone 💕", priority: Priority::High, category: "Personal", emoji: "💑" },
    TaskTemplate { id: "study", title: "Study session", description: "Hit the books and expand your knowledge 📚", priority: Priority::Medium, category: "Education", emoji: "📖" },
    TaskTemplate { id: "cleaning", title: "Deep cleaning", description: "Time to tidy up and organize your space", priority: Priority::Low, category: "Home", emoji: "🧹" },
    TaskTemplate { id: "doctor", title: "Doctor appointment", description: "Health check-up and medical visit", priority: Priority::High, category: "Health", emoji: "🏥" },
    TaskTemplate { id: "french", title: "Learn French", description: "Practice French language skills and vocabulary! 🇫🇷", priority: Priority::Medium, category: "Education", emoji: "🇫🇷" },
    TaskTemplate { id: "dancing", title: "Dance practice", description: "Time to dance and express yourself! 💃🕺", priority: Priority::Low, category: "Hobby", emoji: "💃" },
];

pub fn templates() -> &'static [TaskTemplate] {
    &TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static TaskTemplate> {
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<&str> = templates().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), templates().len());
    }

    #[test]
    fn template_fills_task_fields() {
        let fields = find_template("Doctor").unwrap().to_new_task();
        assert_eq!(fields.title, "Doctor appointment");
        assert_eq!(fields.priority, "high");
        assert_eq!(fields.category.as_deref(), Some("Health"));
        assert!(fields.due_date.is_none());
    }
}
