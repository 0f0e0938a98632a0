//! # remindme
//!
//! Sweet (or spooky) reminders in the terminal.
//!
//! ## Usage
//!
//! Run without arguments to open the interactive UI:
//!
//! ```bash
//! remindme
//! # or explicitly
//! remindme ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `v`: Cycle Tasks / Templates / Rewards / Memories
//! *   `t`: Switch theme (normal / horror)
//! *   `a`: Add task, `Space`: toggle done, `d`: delete, `c`: show/hide done
//! *   `Enter`: create from template (Templates), request reward (Rewards)
//! *   `←`/`→` photos, `n`/`p` memories (Memories)
//!
//! ### Command Line Interface
//!
//! ```bash
//! remindme add "Buy milk" --priority low --due 2025-12-01 --at 18:30 --category Errands
//! remindme add --template doctor --due 2025-12-03
//! remindme list --all --verbose
//! remindme toggle 3f2a91bc
//! remindme rewards
//! remindme claim pringles
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in `tasks.json` in your local data directory
//! (`~/.local/share/remindme/` on Linux), with `settings.json` and `logs/`
//! beside it. Set `REMINDME_DB` to use another tasks file and `REMINDME_LOG`
//! to change the log level.

use std::io;
use std::path::Path;
use std::process::ExitCode;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::error;
use remindme::commands::*;
use remindme::config::Settings;
use remindme::error::Result;
use remindme::logging::{init_logging, level_from_env};
use remindme::storage::{default_db_path, sibling_path, TaskStore};
use remindme::theme::Theme;
use remindme::tui::run_tui;

#[derive(Parser)]
#[command(name = "remindme")]
#[command(about = "Sweet (or spooky) terminal reminders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces); optional with --template
        title: Option<String>,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// Due time in HH:MM (24-hour); needs --due
        #[arg(long)]
        at: Option<String>,
        /// low, medium or high (default medium)
        #[arg(short, long)]
        priority: Option<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Start from a built-in template (see `templates`)
        #[arg(short, long)]
        template: Option<String>,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
        /// Only dated tasks, earliest due first
        #[arg(long)]
        by_due: bool,
        /// Show task descriptions
        #[arg(short, long)]
        verbose: bool,
    },
    /// Mark a task done, or not done again
    Toggle {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete a task permanently
    Remove {
        /// Task id or unique id prefix
        id: String,
    },
    /// List built-in task templates
    Templates,
    /// Show reward level and rewards
    Rewards,
    /// Print a message requesting an unlocked reward
    Claim {
        /// Reward id (see `rewards`)
        reward: String,
        /// Pick the message phrasing deterministically
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Simulated calendar sync
    Calendar {
        #[arg(value_enum, default_value_t = CalendarArg::Status)]
        action: CalendarArg,
    },
    /// Show a memory
    Memories {
        /// Which memory, starting at 1
        #[arg(short, long, default_value_t = 1)]
        index: usize,
    },
    /// Set the display theme, or switch it when omitted
    Theme {
        theme: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Clone, Copy, ValueEnum)]
enum CalendarArg {
    Connect,
    Disconnect,
    Status,
}

impl From<CalendarArg> for CalendarAction {
    fn from(value: CalendarArg) -> Self {
        match value {
            CalendarArg::Connect => CalendarAction::Connect,
            CalendarArg::Disconnect => CalendarAction::Disconnect,
            CalendarArg::Status => CalendarAction::Status,
        }
    }
}

fn run(command: Option<Commands>, db_path: &Path) -> Result<()> {
    let settings_path = Settings::path_for(db_path);
    let mut settings = Settings::load(&settings_path)?;
    let theme = settings.theme;

    match command {
        Some(Commands::Add { title, description, due, at, priority, category, template }) => {
            let mut store = TaskStore::open(db_path)?;
            let args = AddArgs { title, description, due, at, priority, category, template };
            cmd_add(&mut store, theme, args, false)?;
        }
        Some(Commands::List { all, by_due, verbose }) => {
            cmd_list(&TaskStore::open(db_path)?, theme, all, by_due, verbose, now_ms());
        }
        Some(Commands::Toggle { id }) => {
            cmd_toggle(&mut TaskStore::open(db_path)?, theme, &id, false)?;
        }
        Some(Commands::Remove { id }) => {
            cmd_remove(&mut TaskStore::open(db_path)?, theme, &id, false)?;
        }
        Some(Commands::Templates) => cmd_templates(theme),
        Some(Commands::Rewards) => cmd_rewards(&TaskStore::open(db_path)?, theme),
        Some(Commands::Claim { reward, seed }) => {
            let store = TaskStore::open(db_path)?;
            cmd_claim(&store, &settings, &reward, seed.unwrap_or_else(clock_seed), false)?;
        }
        Some(Commands::Calendar { action }) => {
            cmd_calendar(&mut settings, &settings_path, action.into(), false)?;
        }
        Some(Commands::Memories { index }) => cmd_memories(index.saturating_sub(1)),
        Some(Commands::Theme { theme }) => {
            let theme = theme.map(|t| t.parse::<Theme>()).transpose()?;
            cmd_theme(&mut settings, &settings_path, theme, false)?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "remindme", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            let store = TaskStore::open(db_path)?;
            run_tui(store, settings, settings_path)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let db_path = default_db_path();

    if let Err(e) = init_logging(&level_from_env(), &sibling_path(&db_path, "logs")) {
        eprintln!("warning: file logging disabled: {e}");
    }

    match run(cli.command, &db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("event=command status=failed reason=\"{}\"", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
