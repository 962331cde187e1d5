//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - `Selection`, the list selection, filtering and keyboard-focus controller
//! - Derived task views (visibility filter, remaining time)
//! - Form editing state for creating and editing lists and tasks
//! - Navigation types and state errors

mod error;
mod filter;
mod form;
mod navigation;
mod selection;

pub use error::{FetchError, MutationError, StateError};
pub use filter::{format_limit, status_label, VisibilityFilter};
pub use form::{TaskField, LIMIT_INPUT_FORMAT};
pub use navigation::View;
pub use selection::{entry_id, FocusDirection, ListRequest, Phase, TaskRequest};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
