//! Reward levels derived from the number of completed tasks.
//!
//! Two completions unlock one level. The level is recomputed from the current
//! task set every time, so deleting a completed task can lower it again.

use serde::Serialize;
use crate::derived::completed_count;
use crate::error::{Result, TaskError};
use crate::models::Task;

/// Completions needed per level.
pub const TASKS_PER_LEVEL: usize = 2;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    /// Level at which the reward unlocks, starting at 1.
    pub level: u32,
}

const CATALOG: [Reward; 8] = [
    Reward { id: "lays", name: "Lays Chips", description: "A bag of your favorite Lays chips!", emoji: "🥔", level: 1 },
    Reward { id: "pringles", name: "Pringles", description: "A tube of delicious Pringles!", emoji: "🥜", level: 2 },
    Reward { id: "bhel", name: "Home Made Bhel", description: "Delicious home made bhel!", emoji: "🍲", level: 3 },
    Reward { id: "chaat", name: "Home Made Chaat", description: "Authentic home made chaat just for you!", emoji: "🥟", level: 4 },
    Reward { id: "ramen_home", name: "Home Made Ramen Date", description: "A cozy ramen date at home with your favorite toppings!", emoji: "🍜", level: 5 },
    Reward { id: "ramen_out", name: "Ramen Date Outside", description: "Going out for ramen at your favorite spot!", emoji: "🏮", level: 6 },
    Reward { id: "surprise_date", name: "Surprise Date", description: "A surprise date planned just for you!", emoji: "🎁", level: 7 },
    Reward { id: "special_treat", name: "Special Treat", description: "Something extra special coming your way!", emoji: "✨", level: 8 },
];

/// The fixed reward catalog, ordered by level.
pub fn catalog() -> &'static [Reward] {
    &CATALOG
}

pub fn find_reward(id: &str) -> Option<&'static Reward> {
    CATALOG.iter().find(|r| r.id == id)
}

/// `min(completed / 2 + 1, total_levels)`.
pub fn current_level(completed_count: usize, total_levels: u32) -> u32 {
    let level = completed_count / TASKS_PER_LEVEL + 1;
    u32::try_from(level).unwrap_or(u32::MAX).min(total_levels)
}

/// Rewards at or below `level`, in catalog order.
pub fn unlocked_rewards(level: u32, catalog: &[Reward]) -> Vec<&Reward> {
    catalog.iter().filter(|r| r.level <= level).collect()
}

/// The first reward still locked at `level`, if any.
pub fn next_reward(level: u32, catalog: &[Reward]) -> Option<&Reward> {
    catalog.iter().find(|r| r.level > level)
}

/// How many more completions reach the level after `level`.
pub fn tasks_to_next_level(completed_count: usize, level: u32) -> usize {
    (level as usize * TASKS_PER_LEVEL).saturating_sub(completed_count)
}

/// Reward state for one snapshot of the task list.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress<'a> {
    pub completed: usize,
    pub level: u32,
    pub total_levels: u32,
    pub unlocked: Vec<&'a Reward>,
    pub next: Option<&'a Reward>,
    pub tasks_to_next: usize,
}

impl<'a> Progress<'a> {
    pub fn from_count(completed: usize, catalog: &'a [Reward]) -> Self {
        let total_levels = catalog.len() as u32;
        let level = current_level(completed, total_levels);
        Progress {
            completed,
            level,
            total_levels,
            unlocked: unlocked_rewards(level, catalog),
            next: next_reward(level, catalog),
            tasks_to_next: tasks_to_next_level(completed, level),
        }
    }

    pub fn from_tasks(tasks: &[Task], catalog: &'a [Reward]) -> Self {
        Self::from_count(completed_count(tasks), catalog)
    }

    pub fn is_unlocked(&self, reward: &Reward) -> bool {
        reward.level <= self.level
    }

    pub fn at_max_level(&self) -> bool {
        self.level >= self.total_levels
    }
}

const MESSAGE_TEMPLATES: usize = 7;

/// Builds the message asking `partner` for `reward`.
///
/// One of several phrasings is picked by `seed`, so callers decide where the
/// randomness comes from. Fails if the reward is still locked.
pub fn request_message(reward: &Reward, progress: &Progress, partner: &str, seed: u64) -> Result<String> {
    if !progress.is_unlocked(reward) {
        return Err(TaskError::RewardLocked {
            reward: reward.name.to_string(),
            required: reward.level,
            level: progress.level,
        });
    }
    let (name, level, count) = (reward.name, progress.level, progress.completed);
    let msg = match seed % MESSAGE_TEMPLATES as u64 {
        0 => format!("Hey {partner}! I've been working super hard and reached level {level}! Can I please have {name}? I've earned it with all my completed tasks! 💕✨"),
        1 => format!("{partner} darling! I've completed {count} tasks and unlocked {name}! Pretty please? 🥺💖"),
        2 => format!("Hi sweetie! I've been so productive - {count} tasks done! Can I claim my {name} reward now? 🌸💕"),
        3 => format!("{partner}! I've leveled up to {level} and really want {name}! I've been so good with all my tasks! 🎀💖"),
        4 => format!("Hey {partner}! {count} tasks completed means I get to ask for {name}, right? Please please please? 🦄✨"),
        5 => format!("{partner}! I've been crushing my goals and reached level {level}! {name} would make me so happy! 💕🌸"),
        _ => format!("Sweetie! I've done {count} tasks! Can I have my {name} reward now? I've earned it! 🎉💖"),
    };
    Ok(msg)
}
