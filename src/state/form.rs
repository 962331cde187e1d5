//! Form editing state types.
//!
//! This module contains the state of the list and task create/edit forms,
//! including field navigation, loaded-data application and validation.

use super::error::{FetchError, StateError};
use crate::api::{ListSummary, Task, TaskDraft};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use log::*;
use tui_textarea::{CursorMove, TextArea};

/// Input format of the deadline field.
///
pub const LIMIT_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse deadline input in local time. Blank input means no deadline.
///
pub fn parse_limit(input: &str) -> Result<Option<DateTime<Utc>>, StateError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(input, LIMIT_INPUT_FORMAT)
        .map_err(|_| StateError::InvalidLimit(input.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| Some(local.with_timezone(&Utc)))
        .ok_or_else(|| StateError::InvalidLimit(input.to_string()))
}

/// Render a deadline as deadline input in local time.
///
pub fn limit_input(limit: Option<DateTime<Utc>>) -> String {
    limit
        .map(|limit| {
            limit
                .with_timezone(&Local)
                .format(LIMIT_INPUT_FORMAT)
                .to_string()
        })
        .unwrap_or_default()
}

/// State of the list create/edit form.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListForm {
    list_id: Option<String>,
    title: String,
    error_message: Option<String>,
}

impl ListForm {
    /// Return an empty form for creating a list.
    ///
    pub fn create() -> Self {
        ListForm::default()
    }

    /// Return a form editing the given list.
    ///
    pub fn edit(list: &ListSummary) -> Self {
        ListForm {
            list_id: Some(list.id.to_owned()),
            title: list.title.to_owned(),
            error_message: None,
        }
    }

    pub fn list_id(&self) -> Option<&str> {
        self.list_id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_title_char(&mut self, c: char) -> &mut Self {
        self.title.push(c);
        self
    }

    pub fn remove_title_char(&mut self) -> &mut Self {
        self.title.pop();
        self
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error_message(&mut self, message: String) -> &mut Self {
        self.error_message = Some(message);
        self
    }

    /// Apply a fetched list if the form still edits it. Returns whether the
    /// outcome was applied.
    ///
    pub fn apply_loaded(
        &mut self,
        list_id: &str,
        result: Result<ListSummary, FetchError>,
    ) -> bool {
        if self.list_id.as_deref() != Some(list_id) {
            debug!("Discarding list {} loaded for a closed form", list_id);
            return false;
        }
        match result {
            Ok(list) => self.title = list.title,
            Err(e) => self.error_message = Some(e.to_string()),
        }
        true
    }

    /// Return the title to submit.
    ///
    pub fn validated_title(&self) -> Result<String, StateError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(StateError::EmptyTitle);
        }
        Ok(title.to_string())
    }
}

/// Specifying task form fields in navigation order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TaskField {
    Title,
    Detail,
    Limit,
    Done,
}

impl TaskField {
    const ORDER: [TaskField; 4] = [
        TaskField::Title,
        TaskField::Detail,
        TaskField::Limit,
        TaskField::Done,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State of the task create/edit form.
///
pub struct TaskForm {
    list_id: String,
    task_id: Option<String>,
    title: String,
    detail: TextArea<'static>,
    limit_input: String,
    done: bool,
    field: TaskField,
    error_message: Option<String>,
}

impl TaskForm {
    /// Return an empty form for creating a task in the list.
    ///
    pub fn create(list_id: &str) -> Self {
        TaskForm {
            list_id: list_id.to_owned(),
            task_id: None,
            title: String::new(),
            detail: TextArea::default(),
            limit_input: String::new(),
            done: false,
            field: TaskField::Title,
            error_message: None,
        }
    }

    /// Return a form editing the given task.
    ///
    pub fn edit(list_id: &str, task: &Task) -> Self {
        let mut form = TaskForm::create(list_id);
        form.task_id = Some(task.id.to_owned());
        form.fill(task);
        form
    }

    fn fill(&mut self, task: &Task) {
        self.title = task.title.to_owned();
        self.detail = TextArea::from(task.detail.lines().map(str::to_owned).collect::<Vec<_>>());
        self.limit_input = limit_input(task.limit);
        self.done = task.done;
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Return the detail text joined from the text area lines.
    ///
    pub fn detail(&self) -> String {
        self.detail.lines().join("\n")
    }

    /// Return the detail text area (mutable) for rendering.
    ///
    pub fn detail_textarea(&mut self) -> &mut TextArea<'static> {
        &mut self.detail
    }

    pub fn limit_input(&self) -> &str {
        &self.limit_input
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn field(&self) -> TaskField {
        self.field
    }

    pub fn next_field(&mut self) -> &mut Self {
        self.field = self.field.next();
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        self.field = self.field.previous();
        self
    }

    pub fn toggle_done(&mut self) -> &mut Self {
        self.done = !self.done;
        self
    }

    /// Route a typed character to the active field.
    ///
    pub fn add_char(&mut self, c: char) -> &mut Self {
        match self.field {
            TaskField::Title => self.title.push(c),
            TaskField::Detail => self.detail.insert_char(c),
            TaskField::Limit => self.limit_input.push(c),
            TaskField::Done => {
                if c == ' ' {
                    self.toggle_done();
                }
            }
        }
        self
    }

    /// Remove the character before the cursor of the active field.
    ///
    pub fn remove_char(&mut self) -> &mut Self {
        match self.field {
            TaskField::Title => {
                self.title.pop();
            }
            TaskField::Detail => {
                self.detail.delete_char();
            }
            TaskField::Limit => {
                self.limit_input.pop();
            }
            TaskField::Done => {}
        }
        self
    }

    /// Start a new line in the detail field when it is active.
    ///
    pub fn insert_newline(&mut self) -> &mut Self {
        if self.field == TaskField::Detail {
            self.detail.insert_newline();
        }
        self
    }

    /// Move the detail cursor when the detail field is active. Returns
    /// whether the movement was applied.
    ///
    pub fn move_detail_cursor(&mut self, movement: CursorMove) -> bool {
        if self.field != TaskField::Detail {
            return false;
        }
        self.detail.move_cursor(movement);
        true
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error_message(&mut self, message: String) -> &mut Self {
        self.error_message = Some(message);
        self
    }

    /// Apply a fetched task if the form still edits it. Returns whether the
    /// outcome was applied.
    ///
    pub fn apply_loaded(
        &mut self,
        list_id: &str,
        task_id: &str,
        result: Result<Task, FetchError>,
    ) -> bool {
        if self.list_id != list_id || self.task_id.as_deref() != Some(task_id) {
            debug!("Discarding task {} loaded for a closed form", task_id);
            return false;
        }
        match result {
            Ok(task) => self.fill(&task),
            Err(e) => self.error_message = Some(e.to_string()),
        }
        true
    }

    /// Return the draft to submit.
    ///
    pub fn to_draft(&self) -> Result<TaskDraft, StateError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(StateError::EmptyTitle);
        }
        Ok(TaskDraft {
            title: title.to_string(),
            detail: self.detail(),
            done: self.done,
            limit: parse_limit(&self.limit_input)?,
        })
    }
}
