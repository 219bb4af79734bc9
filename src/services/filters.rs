use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::models::Task;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a due/reminder value. Naive values are read as local time.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Due strictly after `now`. Unparseable due dates never count.
pub fn is_upcoming(task: &Task, now: DateTime<Local>) -> bool {
    parse_datetime(&task.due_datetime).is_some_and(|due| due > now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    Upcoming,
}

impl TaskFilter {
    pub fn matches(self, task: &Task, now: DateTime<Local>) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.is_completed,
            TaskFilter::Completed => task.is_completed,
            TaskFilter::Upcoming => is_upcoming(task, now),
        }
    }

    /// Keeps cache order.
    pub fn apply(self, tasks: &[Task], now: DateTime<Local>) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task, now))
            .cloned()
            .collect()
    }
}

pub fn filter_all(tasks: &[Task]) -> Vec<Task> {
    tasks.to_vec()
}

pub fn filter_pending(tasks: &[Task]) -> Vec<Task> {
    TaskFilter::Pending.apply(tasks, Local::now())
}

pub fn filter_completed(tasks: &[Task]) -> Vec<Task> {
    TaskFilter::Completed.apply(tasks, Local::now())
}

pub fn filter_upcoming(tasks: &[Task], now: DateTime<Local>) -> Vec<Task> {
    TaskFilter::Upcoming.apply(tasks, now)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub upcoming: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: DateTime<Local>) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            if task.is_completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }
            if is_upcoming(task, now) {
                stats.upcoming += 1;
            }
            stats
        })
    }
}
