use std::path::PathBuf;
use log::warn;
use ratatui::widgets::TableState;
use crate::commands::{build_new_task, clock_seed, now_ms, AddArgs};
use crate::config::Settings;
use crate::error::Result;
use crate::memories::{memories, Slideshow};
use crate::models::Task;
use crate::rewards::{catalog, request_message, Progress};
use crate::storage::TaskStore;
use crate::templates::{templates, TaskTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Adding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Tasks,
    Templates,
    Rewards,
    Memories,
}

/// Steps of the "Add Task" wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddStep {
    #[default]
    Title,
    Description,
    Priority,
    DueDate,
    DueTime,
    Category,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub args: AddArgs,
    pub step: AddStep,
    pub template: Option<&'static TaskTemplate>,
}

pub struct App {
    store: TaskStore,
    pub settings: Settings,
    settings_path: Option<PathBuf>,
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub template_state: TableState,
    pub reward_state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub add_state: AddState,
    pub show_completed: bool,
    pub slideshow: Slideshow<'static>,
    /// Last message shown in the status bar.
    pub status: Option<String>,
    pub now_ms: i64,
}

impl App {
    /// Creates a new App over an opened store and loads initial data.
    pub fn new(store: TaskStore, settings: Settings, settings_path: Option<PathBuf>) -> App {
        let mut template_state = TableState::default();
        template_state.select(Some(0));
        let mut reward_state = TableState::default();
        reward_state.select(Some(0));

        let mut app = App {
            store,
            settings,
            settings_path,
            tasks: Vec::new(),
            state: TableState::default(),
            template_state,
            reward_state,
            view_mode: ViewMode::Tasks,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_state: AddState::default(),
            show_completed: false,
            slideshow: Slideshow::new(memories()),
            status: None,
            now_ms: now_ms(),
        };
        app.reload();
        app
    }

    pub fn progress(&self) -> Progress<'static> {
        Progress::from_tasks(&self.store.list_tasks(), catalog())
    }

    fn list_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Tasks => self.tasks.len(),
            ViewMode::Templates => templates().len(),
            ViewMode::Rewards => catalog().len(),
            ViewMode::Memories => 0,
        }
    }

    fn list_state(&mut self) -> Option<&mut TableState> {
        match self.view_mode {
            ViewMode::Tasks => Some(&mut self.state),
            ViewMode::Templates => Some(&mut self.template_state),
            ViewMode::Rewards => Some(&mut self.reward_state),
            ViewMode::Memories => None,
        }
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        if let Some(state) = self.list_state() {
            let i = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.select(Some(i));
        }
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        if let Some(state) = self.list_state() {
            let i = match state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    fn report<T>(&mut self, result: Result<T>, ok: impl FnOnce(T) -> String) {
        self.status = Some(match result {
            Ok(value) => ok(value),
            Err(e) => {
                warn!("event=tui_action status=failed reason=\"{}\"", e);
                format!("Error: {e}")
            }
        });
    }

    /// Flips the selected task between done and not done.
    pub fn toggle_selected(&mut self) {
        if self.view_mode != ViewMode::Tasks {
            return;
        }
        if let Some(id) = self.selected_task().map(|t| t.id) {
            let theme = self.settings.theme;
            let result = self.store.toggle_completed(id);
            self.report(result, |t| format!("{} {}", theme.task_toggled(t.completed), t.title));
            self.reload();
        }
    }

    /// Deletes the selected task.
    pub fn delete_selected(&mut self) {
        if self.view_mode != ViewMode::Tasks {
            return;
        }
        if let Some(id) = self.selected_task().map(|t| t.id) {
            let theme = self.settings.theme;
            let result = self.store.delete_task(id);
            self.report(result, |_| theme.task_deleted().to_string());
            self.reload();
        }
    }

    /// Reloads tasks from the store and keeps the selection in range.
    pub fn reload(&mut self) {
        self.now_ms = now_ms();
        self.tasks = if self.show_completed {
            self.store.list_tasks()
        } else {
            self.store.tasks_by_completed(false)
        };

        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Toggles the visibility of completed tasks.
    pub fn toggle_completed_visible(&mut self) {
        self.show_completed = !self.show_completed;
        self.reload();
    }

    /// Cycles Tasks → Templates → Rewards → Memories.
    pub fn cycle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Tasks => ViewMode::Templates,
            ViewMode::Templates => ViewMode::Rewards,
            ViewMode::Rewards => ViewMode::Memories,
            ViewMode::Memories => ViewMode::Tasks,
        };
    }

    /// Switches between the normal and horror themes and saves the choice.
    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        let result = match &self.settings_path {
            Some(path) => self.settings.save(path),
            None => Ok(()),
        };
        let theme = self.settings.theme;
        self.report(result, |_| format!("Theme: {}", theme.title()));
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates adding a task from the selected template.
    ///
    /// Title, priority and category come from the template, so the wizard
    /// starts at the due date.
    pub fn start_add_from_template(&mut self) {
        if self.view_mode != ViewMode::Templates {
            return;
        }
        if let Some(tmpl) = self.template_state.selected().and_then(|i| templates().get(i)) {
            self.input_mode = InputMode::Adding;
            self.add_state = AddState {
                args: AddArgs {
                    template: Some(tmpl.id.to_string()),
                    ..Default::default()
                },
                step: AddStep::DueDate,
                template: Some(tmpl),
            };
            self.input_buffer.clear();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Advances the wizard with the current input.
    pub fn handle_input(&mut self) {
        if self.input_mode != InputMode::Adding {
            return;
        }
        let value = self.input_buffer.trim().to_string();
        let given = (!value.is_empty()).then_some(value);
        let args = &mut self.add_state.args;
        match self.add_state.step {
            AddStep::Title => {
                if given.is_none() {
                    return;
                }
                args.title = given;
                self.add_state.step = AddStep::Description;
            }
            AddStep::Description => {
                args.description = given;
                self.add_state.step = AddStep::Priority;
            }
            AddStep::Priority => {
                args.priority = Some(given.unwrap_or_else(|| "medium".to_string()));
                self.add_state.step = AddStep::DueDate;
            }
            AddStep::DueDate => {
                let has_date = given.is_some();
                args.due = given;
                if !has_date && self.add_state.template.is_some() {
                    return self.finish_add();
                }
                self.add_state.step = if has_date { AddStep::DueTime } else { AddStep::Category };
            }
            AddStep::DueTime => {
                args.at = given;
                if self.add_state.template.is_some() {
                    return self.finish_add();
                }
                self.add_state.step = AddStep::Category;
            }
            AddStep::Category => {
                args.category = given;
                return self.finish_add();
            }
        }
        self.input_buffer.clear();
    }

    fn finish_add(&mut self) {
        let args = std::mem::take(&mut self.add_state.args);
        let theme = self.settings.theme;
        let result = build_new_task(args).and_then(|fields| self.store.create_task(fields));
        self.report(result, |t| format!("{} {}", theme.task_added(), t.title));
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.view_mode = ViewMode::Tasks;
        self.reload();
    }

    /// Builds the request message for the selected reward.
    pub fn claim_selected(&mut self) {
        if self.view_mode != ViewMode::Rewards {
            return;
        }
        if let Some(reward) = self.reward_state.selected().and_then(|i| catalog().get(i)) {
            let progress = self.progress();
            let result = request_message(reward, &progress, &self.settings.partner_name, clock_seed());
            self.report(result, |msg| msg);
        }
    }
}
