use super::error::{FetchError, MutationError, StateError};
use super::form::{ListForm, TaskForm};
use super::navigation::View;
use super::selection::{FocusDirection, ListRequest, Selection, TaskRequest};
use crate::api::{ListSummary, Task};
use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::widgets::ListState;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    spinner_index: usize,
    view_stack: Vec<View>,
    selection: Selection,
    tasks_list_state: ListState,
    list_form: Option<ListForm>,
    task_form: Option<TaskForm>,
    log_buffer: LogBuffer,
    debug_mode: bool,
    debug_index: usize,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            spinner_index: 0,
            view_stack: vec![View::Lists],
            selection: Selection::new(),
            tasks_list_state: ListState::default(),
            list_form: None,
            task_form: None,
            log_buffer: LogBuffer::new(),
            debug_mode: false,
            debug_index: 0,
            theme: Theme::default(),
        }
    }
}

impl State {
    /// Return new state able to dispatch network events.
    ///
    pub fn new(net_sender: NetworkEventSender, log_buffer: LogBuffer, theme: Theme) -> Self {
        State {
            net_sender: Some(net_sender),
            log_buffer,
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        self.view_stack.last().unwrap_or(&View::Lists)
    }

    /// Push a view onto the stack.
    ///
    pub fn push_view(&mut self, view: View) -> &mut Self {
        self.view_stack.push(view);
        self
    }

    /// Return the selection controller.
    ///
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Request the lists for the initial listing.
    ///
    pub fn load_lists(&mut self) -> &mut Self {
        let request = self.selection.request_lists(false);
        self.dispatch(NetworkEvent::Lists(request));
        self
    }

    /// Request the lists again, keeping the selection when possible.
    ///
    pub fn refresh_lists(&mut self) -> &mut Self {
        let request = self.selection.request_lists(true);
        self.dispatch(NetworkEvent::Lists(request));
        self
    }

    /// Apply a list fetch outcome and request the tasks of the resulting
    /// selection. Outcomes of superseded fetches are dropped.
    ///
    pub fn apply_lists(
        &mut self,
        request: &ListRequest,
        result: Result<Vec<ListSummary>, FetchError>,
    ) -> &mut Self {
        let next = self.selection.apply_list_result(request, result);
        self.after_selection_change(next)
    }

    /// Apply a task fetch outcome. Returns false when it was stale.
    ///
    pub fn apply_tasks(
        &mut self,
        request: &TaskRequest,
        result: Result<Vec<Task>, FetchError>,
    ) -> bool {
        let applied = self.selection.apply_tasks(request, result);
        if applied {
            self.sync_task_cursor();
        }
        applied
    }

    /// Select a list by identifier, as a pointer click does.
    ///
    pub fn select_list(&mut self, list_id: &str) -> &mut Self {
        let request = self.selection.select_list(list_id);
        self.after_selection_change(request)
    }

    /// Move keyboard focus, and with it the selection, horizontally.
    ///
    pub fn move_focus(&mut self, direction: FocusDirection) -> &mut Self {
        let request = self.selection.move_focus(direction);
        self.after_selection_change(request)
    }

    /// Switch to the other visibility filter.
    ///
    pub fn toggle_filter(&mut self) -> &mut Self {
        self.selection.toggle_filter();
        self.sync_task_cursor();
        self
    }

    fn after_selection_change(&mut self, request: Option<TaskRequest>) -> &mut Self {
        if let Some(request) = request {
            self.sync_task_cursor();
            self.dispatch(NetworkEvent::Tasks(request));
        }
        self
    }

    /// Point the task cursor at the first visible task, if any.
    ///
    fn sync_task_cursor(&mut self) {
        let visible = self.selection.visible_tasks().len();
        self.tasks_list_state
            .select(if visible > 0 { Some(0) } else { None });
    }

    /// Return the task list state for rendering.
    ///
    pub fn get_tasks_list_state(&mut self) -> &mut ListState {
        &mut self.tasks_list_state
    }

    /// Move the task cursor down, stopping at the last visible task.
    ///
    pub fn next_task_index(&mut self) -> &mut Self {
        let visible = self.selection.visible_tasks().len();
        if visible == 0 {
            return self;
        }
        let next = match self.tasks_list_state.selected() {
            Some(index) => (index + 1).min(visible - 1),
            None => 0,
        };
        self.tasks_list_state.select(Some(next));
        self
    }

    /// Move the task cursor up, stopping at the first visible task.
    ///
    pub fn previous_task_index(&mut self) -> &mut Self {
        if self.selection.visible_tasks().is_empty() {
            return self;
        }
        let previous = self
            .tasks_list_state
            .selected()
            .map(|index| index.saturating_sub(1))
            .unwrap_or(0);
        self.tasks_list_state.select(Some(previous));
        self
    }

    /// Return the task under the cursor.
    ///
    pub fn highlighted_task(&self) -> Option<&Task> {
        let index = self.tasks_list_state.selected()?;
        self.selection.visible_tasks().get(index).copied()
    }

    /// Return the list form, if open.
    ///
    pub fn list_form(&self) -> Option<&ListForm> {
        self.list_form.as_ref()
    }

    pub fn list_form_mut(&mut self) -> Option<&mut ListForm> {
        self.list_form.as_mut()
    }

    /// Return the task form, if open.
    ///
    pub fn task_form(&self) -> Option<&TaskForm> {
        self.task_form.as_ref()
    }

    pub fn task_form_mut(&mut self) -> Option<&mut TaskForm> {
        self.task_form.as_mut()
    }

    /// Open the form for creating a list.
    ///
    pub fn open_new_list(&mut self) -> &mut Self {
        self.list_form = Some(ListForm::create());
        self.push_view(View::NewList)
    }

    /// Open the form editing the selected list and load its stored state.
    ///
    pub fn open_edit_list(&mut self) -> &mut Self {
        let list = match self.selection.selected_list() {
            Some(list) => list.to_owned(),
            None => return self.report(StateError::NoSelection),
        };
        self.list_form = Some(ListForm::edit(&list));
        self.dispatch(NetworkEvent::List { list_id: list.id });
        self.push_view(View::EditList)
    }

    /// Open the form for creating a task in the selected list.
    ///
    pub fn open_new_task(&mut self) -> &mut Self {
        let list_id = match self.selection.selected_list_id() {
            Some(list_id) => list_id.to_owned(),
            None => return self.report(StateError::NoSelection),
        };
        self.task_form = Some(TaskForm::create(&list_id));
        self.push_view(View::NewTask)
    }

    /// Open the form editing the highlighted task and load its stored state.
    ///
    pub fn open_edit_task(&mut self) -> &mut Self {
        let list_id = match self.selection.selected_list_id() {
            Some(list_id) => list_id.to_owned(),
            None => return self.report(StateError::NoSelection),
        };
        let task = match self.highlighted_task() {
            Some(task) => task.to_owned(),
            None => return self.report(StateError::NoTaskHighlighted),
        };
        self.task_form = Some(TaskForm::edit(&list_id, &task));
        self.dispatch(NetworkEvent::Task {
            list_id,
            task_id: task.id,
        });
        self.push_view(View::EditTask)
    }

    /// Close the current form and return to the listing view.
    ///
    pub fn close_form(&mut self) -> &mut Self {
        self.list_form = None;
        self.task_form = None;
        self.view_stack.truncate(1);
        self
    }

    fn report(&mut self, error: StateError) -> &mut Self {
        warn!("{}", error);
        self.selection.set_error_message(error.to_string());
        self
    }

    /// Apply a loaded list to the list form.
    ///
    pub fn apply_list_form_loaded(
        &mut self,
        list_id: &str,
        result: Result<ListSummary, FetchError>,
    ) -> &mut Self {
        match self.list_form.as_mut() {
            Some(form) if *self.view_stack.last().unwrap_or(&View::Lists) == View::EditList => {
                form.apply_loaded(list_id, result);
            }
            _ => debug!("Discarding list {} loaded after its form closed", list_id),
        }
        self
    }

    /// Apply a loaded task to the task form.
    ///
    pub fn apply_task_form_loaded(
        &mut self,
        list_id: &str,
        task_id: &str,
        result: Result<Task, FetchError>,
    ) -> &mut Self {
        match self.task_form.as_mut() {
            Some(form) if *self.view_stack.last().unwrap_or(&View::Lists) == View::EditTask => {
                form.apply_loaded(list_id, task_id, result);
            }
            _ => debug!("Discarding task {} loaded after its form closed", task_id),
        }
        self
    }

    /// Validate the open form and dispatch its create or update request.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let event = match self.current_view() {
            View::NewList | View::EditList => self.list_form.as_ref().map(|form| {
                form.validated_title().map(|title| match form.list_id() {
                    Some(list_id) => NetworkEvent::UpdateList {
                        list_id: list_id.to_owned(),
                        title,
                    },
                    None => NetworkEvent::CreateList { title },
                })
            }),
            View::NewTask | View::EditTask => self.task_form.as_ref().map(|form| {
                form.to_draft().map(|draft| match form.task_id() {
                    Some(task_id) => NetworkEvent::UpdateTask {
                        list_id: form.list_id().to_owned(),
                        task_id: task_id.to_owned(),
                        draft,
                    },
                    None => NetworkEvent::CreateTask {
                        list_id: form.list_id().to_owned(),
                        draft,
                    },
                })
            }),
            View::Lists => None,
        };
        match event {
            Some(Ok(event)) => self.dispatch(event),
            Some(Err(e)) => self.set_form_error(e.to_string()),
            None => {}
        }
        self
    }

    /// Dispatch deletion of the entity the open edit form targets.
    ///
    pub fn delete_form_entity(&mut self) -> &mut Self {
        let event = match self.current_view() {
            View::EditList => self
                .list_form
                .as_ref()
                .and_then(|form| form.list_id())
                .map(|list_id| NetworkEvent::DeleteList {
                    list_id: list_id.to_owned(),
                }),
            View::EditTask => self.task_form.as_ref().and_then(|form| {
                form.task_id().map(|task_id| NetworkEvent::DeleteTask {
                    list_id: form.list_id().to_owned(),
                    task_id: task_id.to_owned(),
                })
            }),
            _ => None,
        };
        if let Some(event) = event {
            self.dispatch(event);
        }
        self
    }

    /// Apply the outcome of a request submitted from the form of `view`.
    /// Success returns to the listing view and refreshes it.
    ///
    pub fn finish_mutation(&mut self, view: View, result: Result<(), MutationError>) -> &mut Self {
        let form_open = *self.current_view() == view;
        match result {
            Ok(()) => {
                if form_open {
                    self.close_form();
                }
                self.refresh_lists();
            }
            Err(e) if form_open => self.set_form_error(e.to_string()),
            Err(e) => warn!("Dropping error for closed form: {}", e),
        }
        self
    }

    fn set_form_error(&mut self, message: String) {
        match self.current_view() {
            View::NewList | View::EditList => {
                if let Some(form) = self.list_form.as_mut() {
                    form.set_error_message(message);
                }
            }
            View::NewTask | View::EditTask => {
                if let Some(form) = self.task_form.as_mut() {
                    form.set_error_message(message);
                }
            }
            View::Lists => {
                self.selection.set_error_message(message);
            }
        }
    }

    /// Return whether the log panel is in debug mode.
    ///
    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Toggle debug mode, pointing at the newest log entry when entering.
    ///
    pub fn toggle_debug_mode(&mut self) -> &mut Self {
        self.debug_mode = !self.debug_mode;
        if self.debug_mode {
            self.debug_index = self.log_buffer.len().saturating_sub(1);
        }
        self
    }

    /// Return the buffered log entries.
    ///
    pub fn get_debug_entries(&self) -> Vec<String> {
        self.log_buffer.snapshot()
    }

    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    pub fn next_debug(&mut self) -> &mut Self {
        let len = self.log_buffer.len();
        if len > 0 && self.debug_index + 1 < len {
            self.debug_index += 1;
        }
        self
    }

    pub fn previous_debug(&mut self) -> &mut Self {
        self.debug_index = self.debug_index.saturating_sub(1);
        self
    }

    /// Return the log entry under the debug cursor.
    ///
    pub fn get_current_debug(&self) -> Option<String> {
        self.log_buffer.snapshot().get(self.debug_index).cloned()
    }

    /// Send a network event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Recieved error from network dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, TaskDraft};
    use fake::{Fake, Faker};
    use std::sync::mpsc;

    fn list(id: &str) -> ListSummary {
        ListSummary {
            id: id.to_string(),
            title: format!("List {}", id),
        }
    }

    fn task(id: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            done,
            ..Faker.fake()
        }
    }

    fn connected() -> (State, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        (State::new(tx, LogBuffer::new(), Theme::default()), rx)
    }

    fn next_request(rx: &mpsc::Receiver<NetworkEvent>) -> TaskRequest {
        match rx.try_recv() {
            Ok(NetworkEvent::Tasks(request)) => request,
            other => panic!("expected task request, got {:?}", other),
        }
    }

    fn list_request(rx: &mpsc::Receiver<NetworkEvent>) -> ListRequest {
        match rx.try_recv() {
            Ok(NetworkEvent::Lists(request)) => request,
            other => panic!("expected list request, got {:?}", other),
        }
    }

    /// Load lists 1..=n with tasks for the first one.
    fn loaded(ids: &[&str], tasks: Vec<Task>) -> (State, mpsc::Receiver<NetworkEvent>) {
        let (mut state, rx) = connected();
        state.load_lists();
        let request = list_request(&rx);
        state.apply_lists(&request, Ok(ids.iter().map(|id| list(id)).collect()));
        let request = next_request(&rx);
        state.apply_tasks(&request, Ok(tasks));
        (state, rx)
    }

    #[test]
    fn default_state_shows_lists_view() {
        let state = State::default();
        assert_eq!(*state.current_view(), View::Lists);
        assert!(state.selection().lists().is_empty());
    }

    #[test]
    fn advance_spinner_index() {
        let mut state = State::default();
        state.advance_spinner_index();
        assert_eq!(state.spinner_index, 1);
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner_index();
        }
        assert_eq!(state.spinner_index, 1);
    }

    #[test]
    fn load_lists_dispatches_initial_fetch() {
        let (mut state, rx) = connected();
        state.load_lists();
        let request = list_request(&rx);
        assert!(!request.refresh);
        assert!(state.selection().is_fetching_lists());
    }

    #[test]
    fn apply_lists_dispatches_task_fetch_for_first_list() {
        let (mut state, rx) = connected();
        state.load_lists();
        let request = list_request(&rx);
        state.apply_lists(&request, Ok(vec![list("1"), list("2")]));
        assert_eq!(next_request(&rx).list_id, "1");
    }

    #[test]
    fn superseded_refresh_does_not_restore_deleted_list() {
        let (mut state, rx) = loaded(&["1", "2"], vec![]);
        state.refresh_lists();
        let older = list_request(&rx);
        state.refresh_lists();
        let newer = list_request(&rx);

        state.apply_lists(&newer, Ok(vec![list("1")]));
        next_request(&rx);
        state.apply_lists(&older, Ok(vec![list("1"), list("2")]));

        assert_eq!(state.selection().lists().len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn select_list_dispatches_task_fetch() {
        let (mut state, rx) = loaded(&["1", "2"], vec![]);
        state.select_list("2");
        assert_eq!(next_request(&rx).list_id, "2");
        assert_eq!(
            state.selection().focused_entry_id(),
            Some("list-2".to_string())
        );
    }

    #[test]
    fn move_focus_at_boundary_dispatches_nothing() {
        let (mut state, rx) = loaded(&["1", "2"], vec![]);
        state.move_focus(FocusDirection::Previous);
        assert!(rx.try_recv().is_err());
        state.move_focus(FocusDirection::Next);
        assert_eq!(next_request(&rx).list_id, "2");
        state.move_focus(FocusDirection::Next);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn task_cursor_is_clamped_and_follows_filter() {
        let (mut state, _rx) = loaded(
            &["1"],
            vec![task("a", false), task("b", false), task("c", true)],
        );
        assert_eq!(state.highlighted_task().unwrap().id, "a");
        state.next_task_index().next_task_index().next_task_index();
        assert_eq!(state.highlighted_task().unwrap().id, "b");
        state.previous_task_index().previous_task_index();
        assert_eq!(state.highlighted_task().unwrap().id, "a");

        state.toggle_filter();
        assert_eq!(state.highlighted_task().unwrap().id, "c");
    }

    #[test]
    fn task_cursor_empty_roster() {
        let (mut state, _rx) = loaded(&["1"], vec![task("a", true)]);
        assert!(state.highlighted_task().is_none());
        state.next_task_index();
        assert!(state.highlighted_task().is_none());
    }

    #[test]
    fn open_edit_list_without_selection_reports_error() {
        let mut state = State::default();
        state.open_edit_list();
        assert_eq!(*state.current_view(), View::Lists);
        assert_eq!(
            state.selection().error_message(),
            Some(StateError::NoSelection.to_string().as_str())
        );
    }

    #[test]
    fn open_edit_list_prefills_and_fetches() {
        let (mut state, rx) = loaded(&["1"], vec![]);
        state.open_edit_list();
        assert_eq!(*state.current_view(), View::EditList);
        assert_eq!(state.list_form().unwrap().title(), "List 1");
        assert_eq!(
            rx.try_recv().unwrap(),
            NetworkEvent::List {
                list_id: "1".to_string()
            }
        );
    }

    #[test]
    fn open_edit_task_uses_highlighted_task() {
        let (mut state, rx) = loaded(&["1"], vec![task("a", false)]);
        state.open_edit_task();
        assert_eq!(*state.current_view(), View::EditTask);
        assert_eq!(state.task_form().unwrap().task_id(), Some("a"));
        assert_eq!(
            rx.try_recv().unwrap(),
            NetworkEvent::Task {
                list_id: "1".to_string(),
                task_id: "a".to_string()
            }
        );
    }

    #[test]
    fn open_edit_task_without_tasks_reports_error() {
        let (mut state, _rx) = loaded(&["1"], vec![]);
        state.open_edit_task();
        assert_eq!(*state.current_view(), View::Lists);
        assert!(state.selection().error_message().is_some());
    }

    #[test]
    fn submit_new_list_dispatches_create() {
        let (mut state, rx) = connected();
        state.open_new_list();
        state.list_form_mut().unwrap().add_title_char('X');
        state.submit_form();
        assert_eq!(
            rx.try_recv().unwrap(),
            NetworkEvent::CreateList {
                title: "X".to_string()
            }
        );
    }

    #[test]
    fn submit_blank_form_sets_form_error() {
        let (mut state, rx) = connected();
        state.open_new_list();
        state.submit_form();
        assert!(rx.try_recv().is_err());
        assert_eq!(
            state.list_form().unwrap().error_message(),
            Some(StateError::EmptyTitle.to_string().as_str())
        );
    }

    #[test]
    fn submit_new_task_targets_selected_list() {
        let (mut state, rx) = loaded(&["1", "2"], vec![]);
        state.select_list("2");
        next_request(&rx);
        state.open_new_task();
        state.task_form_mut().unwrap().add_char('T');
        state.submit_form();
        assert_eq!(
            rx.try_recv().unwrap(),
            NetworkEvent::CreateTask {
                list_id: "2".to_string(),
                draft: TaskDraft {
                    title: "T".to_string(),
                    detail: String::new(),
                    done: false,
                    limit: None,
                },
            }
        );
    }

    #[test]
    fn delete_form_entity_dispatches_delete() {
        let (mut state, rx) = loaded(&["1"], vec![]);
        state.open_edit_list();
        rx.try_recv().unwrap();
        state.delete_form_entity();
        assert_eq!(
            rx.try_recv().unwrap(),
            NetworkEvent::DeleteList {
                list_id: "1".to_string()
            }
        );
    }

    #[test]
    fn finish_mutation_success_closes_form_and_refreshes() {
        let (mut state, rx) = connected();
        state.open_new_list();
        state.finish_mutation(View::NewList, Ok(()));
        assert_eq!(*state.current_view(), View::Lists);
        assert!(state.list_form().is_none());
        assert!(list_request(&rx).refresh);
    }

    #[test]
    fn finish_mutation_failure_keeps_form_open() {
        let (mut state, _rx) = connected();
        state.open_new_list();
        state.finish_mutation(
            View::NewList,
            Err(MutationError::Create(ApiError::Status {
                status: 400,
                message: "bad".to_string(),
            })),
        );
        assert_eq!(*state.current_view(), View::NewList);
        assert!(state
            .list_form()
            .unwrap()
            .error_message()
            .unwrap()
            .starts_with("作成に失敗しました。"));
    }

    #[test]
    fn form_load_after_close_is_discarded() {
        let (mut state, _rx) = loaded(&["1"], vec![]);
        state.open_edit_list();
        state.close_form();
        state.apply_list_form_loaded("1", Ok(list("1")));
        assert!(state.list_form().is_none());
    }

    #[test]
    fn debug_mode_navigation() {
        let buffer = LogBuffer::new();
        buffer.push("first".to_string());
        buffer.push("second".to_string());
        let mut state = State {
            log_buffer: buffer,
            ..State::default()
        };
        state.toggle_debug_mode();
        assert!(state.is_debug_mode());
        assert_eq!(state.get_current_debug(), Some("second".to_string()));
        state.previous_debug();
        assert_eq!(state.get_current_debug(), Some("first".to_string()));
        state.previous_debug();
        assert_eq!(state.get_debug_index(), 0);
        state.next_debug().next_debug();
        assert_eq!(state.get_debug_index(), 1);
    }
}
