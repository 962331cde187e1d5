use crate::api::{Api, TaskDraft};
use crate::state::{FetchError, ListRequest, MutationError, State, TaskRequest, View};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Lists(ListRequest),
    Tasks(TaskRequest),
    List {
        list_id: String,
    },
    Task {
        list_id: String,
        task_id: String,
    },
    CreateList {
        title: String,
    },
    UpdateList {
        list_id: String,
        title: String,
    },
    DeleteList {
        list_id: String,
    },
    CreateTask {
        list_id: String,
        draft: TaskDraft,
    },
    UpdateTask {
        list_id: String,
        task_id: String,
        draft: TaskDraft,
    },
    DeleteTask {
        list_id: String,
        task_id: String,
    },
}

/// Specify struct for managing state with network events. Cloned into every
/// spawned request so responses may resolve in any order.
///
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    api: Api,
}

impl Handler {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: Arc<Mutex<State>>, api: Api) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Lists(request) => self.lists(request).await,
            Event::Tasks(request) => self.tasks(request).await,
            Event::List { list_id } => self.list(list_id).await,
            Event::Task { list_id, task_id } => self.task(list_id, task_id).await,
            Event::CreateList { title } => {
                let result = self.api.create_list(&title).await;
                self.finish(View::NewList, result.map_err(MutationError::Create))
                    .await
            }
            Event::UpdateList { list_id, title } => {
                let result = self.api.update_list(&list_id, &title).await;
                self.finish(View::EditList, result.map_err(MutationError::Update))
                    .await
            }
            Event::DeleteList { list_id } => {
                let result = self.api.delete_list(&list_id).await;
                self.finish(View::EditList, result.map_err(MutationError::Delete))
                    .await
            }
            Event::CreateTask { list_id, draft } => {
                let result = self.api.create_task(&list_id, &draft).await;
                self.finish(View::NewTask, result.map_err(MutationError::Create))
                    .await
            }
            Event::UpdateTask {
                list_id,
                task_id,
                draft,
            } => {
                let result = self.api.update_task(&list_id, &task_id, &draft).await;
                self.finish(View::EditTask, result.map_err(MutationError::Update))
                    .await
            }
            Event::DeleteTask { list_id, task_id } => {
                let result = self.api.delete_task(&list_id, &task_id).await;
                self.finish(View::EditTask, result.map_err(MutationError::Delete))
                    .await
            }
        }
    }

    /// Update state with the list collection.
    ///
    async fn lists(&self, request: ListRequest) -> Result<()> {
        info!("Fetching lists...");
        let result = self.api.lists().await.map_err(FetchError::Lists);
        if let Ok(lists) = &result {
            info!("Received {} lists.", lists.len());
        }
        let mut state = self.state.lock().await;
        state.apply_lists(&request, result);
        Ok(())
    }

    /// Update state with the tasks of the list the request was issued for.
    ///
    async fn tasks(&self, request: TaskRequest) -> Result<()> {
        info!("Fetching tasks for list {}...", request.list_id);
        let result = self
            .api
            .tasks(&request.list_id)
            .await
            .map_err(FetchError::Tasks);
        let mut state = self.state.lock().await;
        if state.apply_tasks(&request, result) {
            info!("Loaded tasks for list {}.", request.list_id);
        }
        Ok(())
    }

    /// Update the list form with the stored list.
    ///
    async fn list(&self, list_id: String) -> Result<()> {
        info!("Fetching list {}...", list_id);
        let result = self.api.list(&list_id).await.map_err(FetchError::List);
        let mut state = self.state.lock().await;
        state.apply_list_form_loaded(&list_id, result);
        Ok(())
    }

    /// Update the task form with the stored task.
    ///
    async fn task(&self, list_id: String, task_id: String) -> Result<()> {
        info!("Fetching task {} of list {}...", task_id, list_id);
        let result = self
            .api
            .task(&list_id, &task_id)
            .await
            .map_err(FetchError::Task);
        let mut state = self.state.lock().await;
        state.apply_task_form_loaded(&list_id, &task_id, result);
        Ok(())
    }

    /// Report the outcome of a form submission to state.
    ///
    async fn finish(&self, view: View, result: Result<(), MutationError>) -> Result<()> {
        match &result {
            Ok(()) => info!("Request from {:?} succeeded.", view),
            Err(e) => error!("Request from {:?} failed: {}", view, e),
        }
        let mut state = self.state.lock().await;
        state.finish_mutation(view, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ListSummary, Task};
    use crate::logger::LogBuffer;
    use crate::ui::Theme;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use std::sync::mpsc;

    fn handler(server: &MockServer) -> (Handler, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        let state = State::new(tx, LogBuffer::new(), Theme::default());
        (
            Handler::new(
                Arc::new(Mutex::new(state)),
                Api::new("token", &server.base_url()),
            ),
            rx,
        )
    }

    /// Issue the initial list fetch through state and run it.
    async fn initial_load(handler: &Handler, rx: &mpsc::Receiver<Event>) -> Result<()> {
        handler.state.lock().await.load_lists();
        let event = rx.try_recv()?;
        handler.handle(event).await
    }

    #[tokio::test]
    async fn lists_event_selects_first_and_dispatches_tasks() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/lists");
                then.status(200).json_body(json!([
                    { "id": "1", "title": "A" },
                    { "id": "2", "title": "B" }
                ]));
            })
            .await;

        let (handler, rx) = handler(&server);
        initial_load(&handler, &rx).await?;

        let state = handler.state.lock().await;
        assert_eq!(state.selection().selected_list_id(), Some("1"));
        match rx.try_recv()? {
            Event::Tasks(request) => assert_eq!(request.list_id, "1"),
            other => panic!("unexpected event {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn lists_failure_sets_error_message() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/lists");
                then.status(500);
            })
            .await;

        let (handler, rx) = handler(&server);
        initial_load(&handler, &rx).await?;

        let state = handler.state.lock().await;
        assert!(state
            .selection()
            .error_message()
            .unwrap()
            .starts_with("リストの取得に失敗しました。"));
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn slow_stale_task_fetch_does_not_overwrite_newer_one() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/lists");
                then.status(200).json_body(json!([
                    { "id": "1", "title": "A" },
                    { "id": "2", "title": "B" }
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/lists/1/tasks");
                then.status(200)
                    .delay(std::time::Duration::from_millis(300))
                    .json_body(json!({ "tasks": [
                        { "id": "from-1", "title": "A task", "detail": "", "done": false, "limit": null }
                    ]}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/lists/2/tasks");
                then.status(200).json_body(json!({ "tasks": [
                    { "id": "from-2", "title": "B task", "detail": "", "done": false, "limit": null }
                ]}));
            })
            .await;

        let (handler, rx) = handler(&server);
        initial_load(&handler, &rx).await?;
        let first = rx.try_recv()?;

        let slow = tokio::spawn({
            let handler = handler.clone();
            async move { handler.handle(first).await }
        });
        {
            let mut state = handler.state.lock().await;
            state.select_list("2");
        }
        let second = rx.try_recv()?;
        handler.handle(second).await?;
        slow.await??;

        let state = handler.state.lock().await;
        assert_eq!(state.selection().selected_list_id(), Some("2"));
        let tasks = state.selection().tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "from-2");
        Ok(())
    }

    #[tokio::test]
    async fn older_refresh_completing_last_is_discarded() -> Result<()> {
        let server = MockServer::start();
        let (handler, rx) = handler(&server);
        let (older, newer) = {
            let mut state = handler.state.lock().await;
            state.refresh_lists();
            let older = rx.try_recv()?;
            state.refresh_lists();
            (older, rx.try_recv()?)
        };

        let after_delete = server
            .mock_async(|when, then| {
                when.method("GET").path("/lists");
                then.status(200).json_body(json!([{ "id": "1", "title": "A" }]));
            })
            .await;
        handler.handle(newer).await?;
        after_delete.delete_async().await;

        server
            .mock_async(|when, then| {
                when.method("GET").path("/lists");
                then.status(200).json_body(json!([
                    { "id": "1", "title": "A" },
                    { "id": "2", "title": "B" }
                ]));
            })
            .await;
        handler.handle(older).await?;

        let state = handler.state.lock().await;
        let ids: Vec<&str> = state
            .selection()
            .lists()
            .iter()
            .map(|list| list.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_list_success_returns_to_lists_and_refreshes() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/lists/1")
                    .json_body(json!({ "title": "Renamed" }));
                then.status(200).json_body(json!({ "id": "1", "title": "Renamed" }));
            })
            .await;

        let (handler, rx) = handler(&server);
        handler.state.lock().await.push_view(View::EditList);
        handler
            .handle(Event::UpdateList {
                list_id: "1".to_string(),
                title: "Renamed".to_string(),
            })
            .await?;
        mock.assert_async().await;

        let state = handler.state.lock().await;
        assert_eq!(*state.current_view(), View::Lists);
        match rx.try_recv()? {
            Event::Lists(request) => assert!(request.refresh),
            other => panic!("unexpected event {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_task_failure_stays_on_form() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/lists/1/tasks/t1");
                then.status(500).body("boom");
            })
            .await;

        let (handler, rx) = handler(&server);
        {
            let mut state = handler.state.lock().await;
            state.load_lists();
            let lists = match rx.try_recv()? {
                Event::Lists(request) => request,
                other => panic!("unexpected event {:?}", other),
            };
            state.apply_lists(
                &lists,
                Ok(vec![ListSummary {
                    id: "1".to_string(),
                    title: "A".to_string(),
                }]),
            );
            let request = match rx.try_recv()? {
                Event::Tasks(request) => request,
                other => panic!("unexpected event {:?}", other),
            };
            let task = Task {
                id: "t1".to_string(),
                done: false,
                ..Faker.fake()
            };
            state.apply_tasks(&request, Ok(vec![task]));
            state.open_edit_task();
        }
        handler
            .handle(Event::DeleteTask {
                list_id: "1".to_string(),
                task_id: "t1".to_string(),
            })
            .await?;

        let state = handler.state.lock().await;
        assert_eq!(*state.current_view(), View::EditTask);
        assert!(state
            .task_form()
            .and_then(|form| form.error_message())
            .unwrap()
            .starts_with("削除に失敗しました。"));
        Ok(())
    }
}
