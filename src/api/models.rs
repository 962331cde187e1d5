//! Wire representations of API payloads.
//!
//! These mirror the JSON exchanged with the server and are converted into the
//! resource types before leaving the `api` module.

use super::resource::{ListSummary, Task, TaskDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier as sent by the server, which may use numbers or strings.
///
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn identifier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(id) => id.to_string(),
        RawId::Text(id) => id,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListModel {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    pub title: String,
}

impl From<ListModel> for ListSummary {
    fn from(model: ListModel) -> Self {
        ListSummary {
            id: model.id,
            title: model.title,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskModel {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub limit: Option<DateTime<Utc>>,
}

impl From<TaskModel> for Task {
    fn from(model: TaskModel) -> Self {
        Task {
            id: model.id,
            title: model.title,
            detail: model.detail,
            done: model.done,
            limit: model.limit,
        }
    }
}

/// Envelope returned by the task collection endpoint.
///
#[derive(Debug, Deserialize)]
pub(crate) struct TasksWrapper {
    #[serde(default)]
    pub tasks: Vec<TaskModel>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBody<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TaskBody<'a> {
    pub title: &'a str,
    pub detail: &'a str,
    pub done: bool,
    pub limit: Option<String>,
}

impl<'a> From<&'a TaskDraft> for TaskBody<'a> {
    fn from(draft: &'a TaskDraft) -> Self {
        TaskBody {
            title: &draft.title,
            detail: &draft.detail,
            done: draft.done,
            limit: draft
                .limit
                .map(|limit| limit.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
        }
    }
}
