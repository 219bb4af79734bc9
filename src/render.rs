use std::fmt::{self, Write as _};

use crate::models::Task;
use crate::services::TaskStats;
use crate::state::{EditModal, View};

pub const EMPTY_CACHE_MESSAGE: &str = "No tasks found.";
pub const EMPTY_FILTER_MESSAGE: &str = "No tasks in this category.";

const PROGRESS_CELLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Flip completion; carries the status to send.
    Toggle { id: i64, is_completed: bool },
    Edit { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due: String,
    pub is_completed: bool,
}

impl TaskCard {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone().filter(|d| !d.is_empty()),
            due: task.due_datetime.clone(),
            is_completed: task.is_completed,
        }
    }

    pub fn pill(&self) -> &'static str {
        if self.is_completed { "Completed" } else { "Pending" }
    }

    /// Fixed placeholder, not a real progress metric.
    pub fn progress_percent(&self) -> u8 {
        if self.is_completed { 100 } else { 40 }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.is_completed { "Mark Pending" } else { "Mark Complete" }
    }

    pub fn actions(&self) -> [CardAction; 3] {
        [
            CardAction::Toggle {
                id: self.id,
                is_completed: !self.is_completed,
            },
            CardAction::Edit { id: self.id },
            CardAction::Delete { id: self.id },
        ]
    }
}

impl fmt::Display for TaskCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = PROGRESS_CELLS * usize::from(self.progress_percent()) / 100;
        writeln!(f, "#{} {}  [{}]", self.id, self.title, self.pill())?;
        if let Some(description) = &self.description {
            writeln!(f, "    {}", description)?;
        }
        writeln!(f, "    Due: {}", self.due)?;
        writeln!(
            f,
            "    [{}{}] {}%",
            "#".repeat(filled),
            "-".repeat(PROGRESS_CELLS - filled),
            self.progress_percent()
        )?;
        write!(
            f,
            "    toggle {id} ({})  edit {id}  delete {id}",
            self.toggle_label(),
            id = self.id
        )
    }
}

/// What the task list currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub cards: Vec<TaskCard>,
    pub count_label: String,
    pub empty_message: Option<&'static str>,
}

impl Default for Listing {
    fn default() -> Self {
        Self::cleared()
    }
}

impl Listing {
    pub fn cleared() -> Self {
        Self {
            cards: Vec::new(),
            count_label: count_label(0),
            empty_message: None,
        }
    }

    pub fn for_cache(tasks: &[Task]) -> Self {
        Self::build(tasks, EMPTY_CACHE_MESSAGE)
    }

    pub fn for_filter(tasks: &[Task]) -> Self {
        Self::build(tasks, EMPTY_FILTER_MESSAGE)
    }

    fn build(tasks: &[Task], empty_message: &'static str) -> Self {
        Self {
            cards: tasks.iter().map(TaskCard::from_task).collect(),
            count_label: count_label(tasks.len()),
            empty_message: tasks.is_empty().then_some(empty_message),
        }
    }
}

pub fn count_label(count: usize) -> String {
    format!("{} tasks", count)
}

/// Borrowed snapshot of everything on screen.
pub struct Screen<'a> {
    pub view: View,
    pub user_name: &'a str,
    pub stats: TaskStats,
    pub listing: &'a Listing,
    pub edit: Option<&'a EditModal>,
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.view {
            View::Login => {
                writeln!(f, "== Login ==")?;
                write!(f, "login <email> <password>   |   show register")
            }
            View::Register => {
                writeln!(f, "== Register ==")?;
                write!(f, "register <name> <email> <phone|-> <password>   |   show login")
            }
            View::Tasks => {
                let mut out = String::new();
                writeln!(out, "== Tasks == Welcome, {}", self.user_name)?;
                writeln!(
                    out,
                    "Total {} | Pending {} | Completed {} | Upcoming {}",
                    self.stats.total, self.stats.pending, self.stats.completed, self.stats.upcoming
                )?;
                writeln!(out, "{}", self.listing.count_label)?;
                if let Some(message) = self.listing.empty_message {
                    writeln!(out, "{}", message)?;
                }
                for card in &self.listing.cards {
                    writeln!(out, "{}", card)?;
                }
                if let Some(modal) = self.edit {
                    writeln!(out, "-- Editing task #{} --", modal.task_id)?;
                    writeln!(out, "    title: {}", modal.form.title)?;
                    writeln!(out, "    description: {}", modal.form.description)?;
                    writeln!(out, "    due: {}", modal.form.due)?;
                    writeln!(out, "    reminder: {}", modal.form.reminder)?;
                }
                f.write_str(out.trim_end())
            }
        }
    }
}
