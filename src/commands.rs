use std::path::Path;
use chrono::{Local, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crate::calendar::{CalendarSync, SimulatedCalendar};
use crate::config::Settings;
use crate::derived::{is_overdue, overdue_count, pending_count};
use crate::error::{Result, TaskError};
use crate::format::{due_timestamp, format_due_date_local, format_due_time};
use crate::memories::{memories, Slideshow};
use crate::models::{NewTask, Priority, Task};
use crate::rewards::{catalog, find_reward, request_message, Progress};
use crate::storage::TaskStore;
use crate::templates::{find_template, templates};
use crate::theme::Theme;

/// Fields for `add`, as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`, local time.
    pub due: Option<String>,
    /// `HH:MM`, local time.
    pub at: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    Connect,
    Disconnect,
    Status,
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// A seed for picking message phrasings, taken from the clock.
pub fn clock_seed() -> u64 {
    let now = Utc::now();
    (now.timestamp() as u64).wrapping_mul(1_000_000_007) ^ u64::from(now.timestamp_subsec_nanos())
}

/// Human-readable due date and time, e.g. `Mon, Jan 15, 2024 at 1:05 PM`.
pub fn describe_due(task: &Task) -> Option<String> {
    let date = format_due_date_local(task.due_date?);
    match &task.due_time {
        Some(time) => {
            let time = format_due_time(time).unwrap_or_else(|_| time.clone());
            Some(format!("{} at {}", date, time))
        }
        None => Some(date),
    }
}

/// Builds the task fields for `add`.
///
/// Values from a template fill whatever was not given explicitly. Without a
/// template or an explicit priority, tasks are `medium`.
pub fn build_new_task(args: AddArgs) -> Result<NewTask> {
    let mut fields = match &args.template {
        Some(id) => find_template(id)
            .ok_or_else(|| TaskError::UnknownTemplate(id.clone()))?
            .to_new_task(),
        None => NewTask::new("", "medium"),
    };
    if let Some(title) = args.title {
        fields.title = title;
    }
    if let Some(priority) = args.priority {
        fields.priority = priority;
    }
    if args.description.is_some() {
        fields.description = args.description;
    }
    if args.category.is_some() {
        fields.category = args.category;
    }
    match (&args.due, &args.at) {
        (Some(date), time) => {
            fields.due_date = Some(due_timestamp(date, time.as_deref(), &Local)?);
            fields.due_time = time.clone();
        }
        (None, time) => fields.due_time = time.clone(),
    }
    Ok(fields)
}

/// Adds a new task to the database.
pub fn cmd_add(store: &mut TaskStore, theme: Theme, args: AddArgs, silent: bool) -> Result<Task> {
    let task = store.create_task(build_new_task(args)?)?;
    if !silent {
        println!("{} (id = {})", theme.task_added(), task.id.short());
    }
    Ok(task)
}

/// Flips a task between done and not done.
pub fn cmd_toggle(store: &mut TaskStore, theme: Theme, id: &str, silent: bool) -> Result<Task> {
    let id = store.resolve_id(id)?;
    let task = store.toggle_completed(id)?;
    if !silent {
        println!("{} {}", theme.task_toggled(task.completed), task.title);
        let progress = Progress::from_tasks(&store.list_tasks(), catalog());
        println!("Level {} ({} completed)", progress.level, progress.completed);
    }
    Ok(task)
}

/// Removes a task from the database.
pub fn cmd_remove(store: &mut TaskStore, theme: Theme, id: &str, silent: bool) -> Result<()> {
    let id = store.resolve_id(id)?;
    let title = store.get_task(id)?.title;
    store.delete_task(id)?;
    if !silent {
        println!("{}: {}", theme.task_deleted(), title);
    }
    Ok(())
}

/// Builds the task table. Overdue rows are highlighted; `verbose` adds a
/// Description column.
pub fn task_table(tasks: &[Task], theme: Theme, now_ms: i64, verbose: bool) -> Table {
    let mut header = vec!["ID", "Title", "Priority", "Category", "Due", "Status"];
    if verbose {
        header.insert(2, "Description");
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );

    for t in tasks {
        let overdue = is_overdue(t, now_ms);
        let (status, status_color) = if t.completed {
            (format!("{} Done", theme.done_mark()), Color::Green)
        } else if overdue {
            ("Overdue".to_string(), Color::Red)
        } else {
            ("Pending".to_string(), Color::Yellow)
        };
        let priority_color = match t.priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Magenta,
            Priority::Low => Color::Cyan,
        };

        let mut row = vec![
            Cell::new(t.id.short()),
            Cell::new(&t.title),
            Cell::new(format!("{} {}", theme.priority_icon(t.priority), t.priority.as_str().to_uppercase()))
                .fg(priority_color),
            Cell::new(t.category.clone().unwrap_or_default()),
            Cell::new(describe_due(t).unwrap_or_default())
                .fg(if overdue { Color::Red } else { Color::Reset }),
            Cell::new(status).fg(status_color),
        ];
        if verbose {
            row.insert(2, Cell::new(t.description.as_deref().unwrap_or("")));
        }
        table.add_row(row);
    }
    table
}

/// Lists tasks in a formatted table.
///
/// By default, hides completed tasks unless `all` is true. With `by_due`,
/// only dated tasks are shown, earliest first. `verbose` includes descriptions.
pub fn cmd_list(store: &TaskStore, theme: Theme, all: bool, by_due: bool, verbose: bool, now_ms: i64) {
    let mut tasks = if by_due {
        store.tasks_by_due_date()
    } else if all {
        store.list_tasks()
    } else {
        store.tasks_by_completed(false)
    };
    if by_due && !all {
        tasks.retain(|t| !t.completed);
    }
    if tasks.is_empty() {
        println!("{}", theme.empty_list());
        return;
    }
    println!("{}", task_table(&tasks, theme, now_ms, verbose));

    let everything = store.list_tasks();
    println!(
        "{} pending, {} overdue, {} total",
        pending_count(&everything),
        overdue_count(&everything, now_ms),
        everything.len()
    );
}

/// Lists the built-in task templates.
pub fn cmd_templates(theme: Theme) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Priority", "Category", "Description"]);
    for t in templates() {
        table.add_row(vec![
            t.id.to_string(),
            format!("{} {}", t.emoji, t.title),
            format!("{} {}", theme.priority_icon(t.priority), t.priority),
            t.category.to_string(),
            t.description.to_string(),
        ]);
    }
    println!("{table}");
}

/// Shows the current reward level and the catalog with lock state.
pub fn cmd_rewards(store: &TaskStore, theme: Theme) {
    let progress = Progress::from_tasks(&store.list_tasks(), catalog());
    let pips: String = (1..=progress.total_levels)
        .map(|l| if l <= progress.level { '●' } else { '○' })
        .collect();
    println!("{}: Level {} {}", theme.level_heading(), progress.level, pips);
    if progress.at_max_level() {
        println!("Every reward is unlocked!");
    } else {
        println!(
            "Complete {} more tasks to reach the next level!",
            progress.tasks_to_next
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Reward", "Level", "Status"]);
    for r in catalog() {
        let unlocked = progress.is_unlocked(r);
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(format!("{} {}", r.emoji, r.name)),
            Cell::new(r.level),
            if unlocked {
                Cell::new("Unlocked").fg(Color::Green)
            } else {
                Cell::new("Locked").fg(Color::DarkGrey)
            },
        ]);
    }
    println!("{table}");
}

/// Produces the request message for an unlocked reward.
pub fn cmd_claim(store: &TaskStore, settings: &Settings, reward_id: &str, seed: u64, silent: bool) -> Result<String> {
    let reward = find_reward(reward_id.trim())
        .ok_or_else(|| TaskError::UnknownReward(reward_id.to_string()))?;
    let progress = Progress::from_tasks(&store.list_tasks(), catalog());
    let message = request_message(reward, &progress, &settings.partner_name, seed)?;
    if !silent {
        println!("{message}");
    }
    Ok(message)
}

/// Connects, disconnects or reports the simulated calendar sync.
///
/// Returns whether sync is connected afterwards.
pub fn cmd_calendar(settings: &mut Settings, settings_path: &Path, action: CalendarAction, silent: bool) -> Result<bool> {
    let mut calendar = SimulatedCalendar::new(settings.calendar_connected);
    let theme = settings.theme;
    let message = match action {
        CalendarAction::Connect => {
            calendar.connect()?;
            theme.calendar_connected().to_string()
        }
        CalendarAction::Disconnect => {
            calendar.disconnect()?;
            theme.calendar_disconnected().to_string()
        }
        CalendarAction::Status => format!(
            "{}: {}",
            theme.calendar_name(),
            if calendar.is_connected() { "connected" } else { "not connected" }
        ),
    };
    if calendar.is_connected() != settings.calendar_connected {
        settings.calendar_connected = calendar.is_connected();
        settings.save(settings_path)?;
    }
    if !silent {
        println!("{message}");
    }
    Ok(calendar.is_connected())
}

/// Prints one memory and the list of its photos.
pub fn cmd_memories(index: usize) {
    let show = Slideshow::at(memories(), index);
    let Some(memory) = show.current() else {
        println!("No memories yet.");
        return;
    };
    println!("{} ({})", memory.title, memory.display_date());
    println!();
    println!("{}", memory.message);
    println!();
    for (i, image) in memory.images.iter().enumerate() {
        println!("  [{}] {}", i + 1, image);
    }
    println!(
        "\nMemory {} of {}",
        show.memory_index() + 1,
        memories().len()
    );
}

/// Sets the theme, or flips it when `theme` is `None`.
pub fn cmd_theme(settings: &mut Settings, settings_path: &Path, theme: Option<Theme>, silent: bool) -> Result<Theme> {
    let next = theme.unwrap_or_else(|| settings.theme.toggled());
    settings.theme = next;
    settings.save(settings_path)?;
    if !silent {
        println!("Theme set to {}. {}", next, next.title());
    }
    Ok(next)
}
