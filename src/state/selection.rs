//! List selection controller.
//!
//! Keeps the loaded lists, the selected list, the tasks belonging to that
//! selection, the visibility filter, and keyboard focus mutually consistent
//! while fetch results arrive in any order.
//!
//! The controller performs no I/O. Operations that require tasks to be
//! fetched return a [`TaskRequest`]; the caller dispatches it and hands the
//! outcome back through [`Selection::apply_tasks`], which drops results
//! belonging to a superseded request. List fetches are tagged the same way
//! with a [`ListRequest`].

use super::error::FetchError;
use super::filter::{self, VisibilityFilter};
use crate::api::{ListSummary, Task};
use log::*;

const ENTRY_ID_PREFIX: &str = "list-";

/// Return the roster entry identifier for a list.
///
pub fn entry_id(list_id: &str) -> String {
    format!("{}{}", ENTRY_ID_PREFIX, list_id)
}

/// Specifying the horizontal movement of keyboard focus.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FocusDirection {
    Previous,
    Next,
}

/// Specifying the lifecycle phase of the controller. Errors are an overlay
/// reported by [`Selection::error_message`], not a phase.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Uninitialized,
    ListsLoaded,
    TasksLoading,
    TasksLoaded,
}

/// A task fetch tagged with the selection generation it was issued for.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TaskRequest {
    pub list_id: String,
    pub generation: u64,
}

/// A list fetch tagged with the list generation it was issued for.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ListRequest {
    pub refresh: bool,
    pub generation: u64,
}

/// Houses the selection state of the listing view.
///
#[derive(Debug, Default)]
pub struct Selection {
    lists: Vec<ListSummary>,
    lists_loaded: bool,
    lists_pending: bool,
    list_generation: u64,
    selected_list_id: Option<String>,
    tasks: Option<Vec<Task>>,
    tasks_pending: bool,
    visibility_filter: VisibilityFilter,
    generation: u64,
    error_message: Option<String>,
}

impl Selection {
    /// Return a new instance with nothing loaded.
    ///
    pub fn new() -> Self {
        Selection::default()
    }

    /// Return the loaded lists in display order.
    ///
    pub fn lists(&self) -> &[ListSummary] {
        &self.lists
    }

    /// Return the selected list identifier.
    ///
    pub fn selected_list_id(&self) -> Option<&str> {
        self.selected_list_id.as_deref()
    }

    /// Return the selected list.
    ///
    pub fn selected_list(&self) -> Option<&ListSummary> {
        let id = self.selected_list_id.as_deref()?;
        self.lists.iter().find(|list| list.id == id)
    }

    /// Return the display position of the selected list.
    ///
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_list_id.as_deref()?;
        self.lists.iter().position(|list| list.id == id)
    }

    /// Return the roster entry holding keyboard focus. Focus is derived from
    /// the selection so the two cannot diverge.
    ///
    pub fn focused_entry_id(&self) -> Option<String> {
        self.selected_list_id.as_deref().map(entry_id)
    }

    /// Return the tasks of the selected list, if loaded.
    ///
    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    /// Return the tasks the roster shows under the current filter.
    ///
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible_tasks(self.tasks(), self.visibility_filter)
    }

    pub fn visibility_filter(&self) -> VisibilityFilter {
        self.visibility_filter
    }

    /// Set the visibility filter. Triggers no fetch.
    ///
    pub fn set_filter(&mut self, filter: VisibilityFilter) -> &mut Self {
        debug!("Setting visibility filter to {:?}", filter);
        self.visibility_filter = filter;
        self
    }

    /// Switch to the other visibility filter.
    ///
    pub fn toggle_filter(&mut self) -> &mut Self {
        let filter = self.visibility_filter.toggled();
        self.set_filter(filter)
    }

    /// Return the most recent error message.
    ///
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Replace the error message. Only the latest one is kept.
    ///
    pub fn set_error_message(&mut self, message: String) -> &mut Self {
        self.error_message = Some(message);
        self
    }

    /// Return the current lifecycle phase. A selection whose task fetch
    /// failed counts as loaded with no tasks.
    ///
    pub fn phase(&self) -> Phase {
        if !self.lists_loaded {
            Phase::Uninitialized
        } else if self.selected_list_id.is_none() {
            Phase::ListsLoaded
        } else if self.tasks_pending && self.tasks.is_none() {
            Phase::TasksLoading
        } else {
            Phase::TasksLoaded
        }
    }

    /// Return whether a list fetch is outstanding.
    ///
    pub fn is_fetching_lists(&self) -> bool {
        self.lists_pending
    }

    /// Issue a list fetch. Any fetch issued earlier is superseded.
    ///
    pub fn request_lists(&mut self, refresh: bool) -> ListRequest {
        self.list_generation += 1;
        self.lists_pending = true;
        ListRequest {
            refresh,
            generation: self.list_generation,
        }
    }

    /// Apply the outcome of a tagged list fetch. Outcomes of superseded
    /// fetches are dropped.
    ///
    pub fn apply_list_result(
        &mut self,
        request: &ListRequest,
        result: Result<Vec<ListSummary>, FetchError>,
    ) -> Option<TaskRequest> {
        if request.generation != self.list_generation {
            debug!(
                "Discarding stale list result (generation {}, current {})",
                request.generation, self.list_generation
            );
            return None;
        }
        self.lists_pending = false;
        if request.refresh {
            self.apply_refreshed_lists(result)
        } else {
            self.apply_lists(result)
        }
    }

    /// Apply the outcome of the initial list load. On success the first list
    /// becomes the selection.
    ///
    pub fn apply_lists(
        &mut self,
        result: Result<Vec<ListSummary>, FetchError>,
    ) -> Option<TaskRequest> {
        let lists = self.accept_lists(result)?;
        let first = lists.first().map(|list| list.id.to_owned());
        self.replace_lists(lists, first)
    }

    /// Apply the outcome of a list refresh. A selection still present in the
    /// new collection is kept and its tasks are fetched again; otherwise the
    /// first list becomes the selection.
    ///
    pub fn apply_refreshed_lists(
        &mut self,
        result: Result<Vec<ListSummary>, FetchError>,
    ) -> Option<TaskRequest> {
        let lists = self.accept_lists(result)?;
        let kept = self
            .selected_list_id
            .as_deref()
            .filter(|id| lists.iter().any(|list| list.id == *id))
            .map(str::to_owned);
        let preferred = kept.or_else(|| lists.first().map(|list| list.id.to_owned()));
        self.replace_lists(lists, preferred)
    }

    /// Select a list by identifier. Identifiers absent from the loaded lists
    /// are ignored, as is reselecting the current list.
    ///
    pub fn select_list(&mut self, list_id: &str) -> Option<TaskRequest> {
        if !self.lists.iter().any(|list| list.id == list_id) {
            debug!("Ignoring selection of unknown list {}", list_id);
            return None;
        }
        if self.selected_list_id.as_deref() == Some(list_id) {
            return None;
        }
        debug!("Selecting list {}", list_id);
        self.selected_list_id = Some(list_id.to_owned());
        self.tasks = None;
        Some(self.next_request(list_id))
    }

    /// Move focus to the adjacent roster entry and select it. Focus does not
    /// wrap at either end of the roster.
    ///
    pub fn move_focus(&mut self, direction: FocusDirection) -> Option<TaskRequest> {
        let index = self.selected_index()?;
        let target = match direction {
            FocusDirection::Previous => index.checked_sub(1)?,
            FocusDirection::Next => index + 1,
        };
        let list_id = self.lists.get(target)?.id.to_owned();
        self.select_list(&list_id)
    }

    /// Return whether the request still matches the selection it was issued
    /// for.
    ///
    pub fn is_current(&self, request: &TaskRequest) -> bool {
        request.generation == self.generation
            && self.selected_list_id.as_deref() == Some(request.list_id.as_str())
    }

    /// Apply the outcome of a task fetch. Returns false when the request was
    /// superseded and its outcome dropped. A failure keeps the tasks already
    /// present.
    ///
    pub fn apply_tasks(
        &mut self,
        request: &TaskRequest,
        result: Result<Vec<Task>, FetchError>,
    ) -> bool {
        if !self.is_current(request) {
            debug!(
                "Discarding stale task result for list {} (generation {}, current {})",
                request.list_id, request.generation, self.generation
            );
            return false;
        }
        self.tasks_pending = false;
        match result {
            Ok(tasks) => {
                debug!("Applying {} tasks for list {}", tasks.len(), request.list_id);
                self.tasks = Some(tasks);
            }
            Err(e) => {
                warn!("{}", e);
                self.error_message = Some(e.to_string());
            }
        }
        true
    }

    fn accept_lists(
        &mut self,
        result: Result<Vec<ListSummary>, FetchError>,
    ) -> Option<Vec<ListSummary>> {
        match result {
            Ok(lists) => Some(lists),
            Err(e) => {
                warn!("{}", e);
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    fn replace_lists(
        &mut self,
        lists: Vec<ListSummary>,
        preferred: Option<String>,
    ) -> Option<TaskRequest> {
        self.lists = lists;
        self.lists_loaded = true;
        match preferred {
            Some(list_id) => {
                if self.selected_list_id.as_deref() != Some(list_id.as_str()) {
                    self.selected_list_id = Some(list_id.to_owned());
                    self.tasks = None;
                }
                Some(self.next_request(&list_id))
            }
            None => {
                self.selected_list_id = None;
                self.tasks = None;
                self.tasks_pending = false;
                self.generation += 1;
                None
            }
        }
    }

    fn next_request(&mut self, list_id: &str) -> TaskRequest {
        self.generation += 1;
        self.tasks_pending = true;
        TaskRequest {
            list_id: list_id.to_owned(),
            generation: self.generation,
        }
    }
}
