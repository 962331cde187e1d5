use chrono::{DateTime, Utc};
use fake::Dummy;

/// Defines list summary data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct ListSummary {
    pub id: String,
    pub title: String,
}

/// Defines task data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub detail: String,
    pub done: bool,
    pub limit: Option<DateTime<Utc>>, // None means no deadline
}

/// Defines the writable fields of a task for create and update requests.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub detail: String,
    pub done: bool,
    pub limit: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        TaskDraft {
            title: task.title.to_owned(),
            detail: task.detail.to_owned(),
            done: task.done,
            limit: task.limit,
        }
    }
}
