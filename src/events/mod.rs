//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: list and task API interactions
//! - Terminal events: keyboard input and terminal interactions

pub mod network;
pub mod terminal;
