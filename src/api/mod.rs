//! Remote list and task API.
//!
//! `Api` performs the asynchronous requests and transforms response data into
//! the explicitly-defined resource types used by the rest of the application.

mod client;
mod error;
mod models;
mod resource;

pub use error::{ApiError, ApiResult};
pub use resource::*;

use client::Client;
use log::*;
use models::{ListBody, ListModel, TaskBody, TaskModel, TasksWrapper};
use reqwest::Method;

/// Responsible for asynchronous interaction with the list and task API.
///
#[derive(Clone)]
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given access token and base URL.
    ///
    pub fn new(access_token: &str, base_url: &str) -> Api {
        debug!("Initializing API client for {}...", base_url);
        Api {
            client: Client::new(access_token, base_url),
        }
    }

    /// Returns the lists in display order.
    ///
    pub async fn lists(&self) -> ApiResult<Vec<ListSummary>> {
        debug!("Requesting lists...");
        let data: Vec<ListModel> = self.client.get("lists").await?;
        debug!("Retrieved {} lists", data.len());
        Ok(data.into_iter().map(ListSummary::from).collect())
    }

    /// Returns a single list.
    ///
    pub async fn list(&self, list_id: &str) -> ApiResult<ListSummary> {
        debug!("Requesting list {}...", list_id);
        let data: ListModel = self.client.get(&format!("lists/{}", list_id)).await?;
        Ok(data.into())
    }

    /// Create a list with the given title.
    ///
    pub async fn create_list(&self, title: &str) -> ApiResult<()> {
        debug!("Creating list '{}'...", title);
        self.client
            .send_discard(Method::POST, "lists", Some(&ListBody { title }))
            .await
    }

    /// Rename a list.
    ///
    pub async fn update_list(&self, list_id: &str, title: &str) -> ApiResult<()> {
        debug!("Updating list {}...", list_id);
        self.client
            .send_discard(
                Method::PUT,
                &format!("lists/{}", list_id),
                Some(&ListBody { title }),
            )
            .await
    }

    /// Delete a list.
    ///
    pub async fn delete_list(&self, list_id: &str) -> ApiResult<()> {
        debug!("Deleting list {}...", list_id);
        self.client
            .send_discard::<()>(Method::DELETE, &format!("lists/{}", list_id), None)
            .await
    }

    /// Returns the tasks of a list in display order.
    ///
    pub async fn tasks(&self, list_id: &str) -> ApiResult<Vec<Task>> {
        debug!("Requesting tasks for list {}...", list_id);
        let data: TasksWrapper = self
            .client
            .get(&format!("lists/{}/tasks", list_id))
            .await?;
        debug!("Retrieved {} tasks for list {}", data.tasks.len(), list_id);
        Ok(data.tasks.into_iter().map(Task::from).collect())
    }

    /// Returns a single task.
    ///
    pub async fn task(&self, list_id: &str, task_id: &str) -> ApiResult<Task> {
        debug!("Requesting task {} of list {}...", task_id, list_id);
        let data: TaskModel = self
            .client
            .get(&format!("lists/{}/tasks/{}", list_id, task_id))
            .await?;
        Ok(data.into())
    }

    /// Create a task in the list.
    ///
    pub async fn create_task(&self, list_id: &str, draft: &TaskDraft) -> ApiResult<()> {
        debug!("Creating task '{}' in list {}...", draft.title, list_id);
        self.client
            .send_discard(
                Method::POST,
                &format!("lists/{}/tasks", list_id),
                Some(&TaskBody::from(draft)),
            )
            .await
    }

    /// Replace the writable fields of a task.
    ///
    pub async fn update_task(
        &self,
        list_id: &str,
        task_id: &str,
        draft: &TaskDraft,
    ) -> ApiResult<()> {
        debug!("Updating task {} of list {}...", task_id, list_id);
        self.client
            .send_discard(
                Method::PUT,
                &format!("lists/{}/tasks/{}", list_id, task_id),
                Some(&TaskBody::from(draft)),
            )
            .await
    }

    /// Delete a task.
    ///
    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> ApiResult<()> {
        debug!("Deleting task {} of list {}...", task_id, list_id);
        self.client
            .send_discard::<()>(
                Method::DELETE,
                &format!("lists/{}/tasks/{}", list_id, task_id),
                None,
            )
            .await
    }
}
