//! Derived task views.
//!
//! Pure functions computing what the task roster shows from the fetched task
//! collection, the visibility filter, and the caller's clock reading.

use crate::api::Task;
use chrono::{DateTime, Local, Utc};

const NO_DEADLINE: &str = "期限未設定";
const EXPIRED: &str = "期限切れ";

/// Specifying which tasks the roster shows.
///
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum VisibilityFilter {
    #[default]
    Incomplete,
    Complete,
}

impl VisibilityFilter {
    /// Return the other filter value.
    ///
    pub fn toggled(self) -> Self {
        match self {
            VisibilityFilter::Incomplete => VisibilityFilter::Complete,
            VisibilityFilter::Complete => VisibilityFilter::Incomplete,
        }
    }

    /// Return the label shown in the filter selector.
    ///
    pub fn label(self) -> &'static str {
        status_label(self == VisibilityFilter::Complete)
    }

    fn matches(self, task: &Task) -> bool {
        task.done == (self == VisibilityFilter::Complete)
    }
}

/// Return the tasks matching the filter, preserving their fetched order. An
/// unset collection yields an empty view.
///
pub fn visible_tasks(tasks: Option<&[Task]>, filter: VisibilityFilter) -> Vec<&Task> {
    tasks
        .unwrap_or_default()
        .iter()
        .filter(|task| filter.matches(task))
        .collect()
}

/// Return the human-readable time left until the deadline.
///
pub fn remaining_time(limit: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let limit = match limit {
        Some(limit) => limit,
        None => return NO_DEADLINE.to_string(),
    };

    let difference_ms = (limit - now).num_milliseconds();
    if difference_ms <= 0 {
        return EXPIRED.to_string();
    }

    let minutes = difference_ms / (1000 * 60);
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}日 {}時間 {}分", days, hours % 24, minutes % 60)
    } else if hours > 0 {
        format!("{}時間 {}分", hours, minutes % 60)
    } else {
        format!("{}分", minutes)
    }
}

/// Return the deadline line of a task, or an empty string without one.
///
pub fn format_limit(limit: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match limit {
        Some(deadline) => format!(
            "期限: {} / 残り時間： {}",
            deadline.with_timezone(&Local).format("%Y/%m/%d %H:%M:%S"),
            remaining_time(limit, now)
        ),
        None => String::new(),
    }
}

/// Return the completion label of a task.
///
pub fn status_label(done: bool) -> &'static str {
    if done {
        "完了"
    } else {
        "未完了"
    }
}
