use crate::state::{FocusDirection, State, TaskField, View};
use crate::ui;
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
};
use log::*;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tui_textarea::CursorMove;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Click { column: u16, row: u16 },
    Tick,
}

/// Specify struct for managing terminal events channel. The polling thread
/// runs from construction until the handler is dropped.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    running: Arc<AtomicBool>,
    poller: Option<JoinHandle<()>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let poller_running = Arc::clone(&running);
        let poller = thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            while poller_running.load(Ordering::Relaxed) {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if tx.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Mouse(MouseEvent {
                            kind: MouseEventKind::Down(MouseButton::Left),
                            column,
                            row,
                            ..
                        })) => {
                            if tx.send(Event::Click { column, row }).is_err() {
                                break;
                            }
                        }
                        Ok(_) => (),
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => (),
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx.send(Event::Tick).is_err() {
                    break;
                }
            }
            debug!("Terminal event polling stopped.");
        });
        Handler {
            rx,
            running,
            poller: Some(poller),
        }
    }

    /// Block until the next terminal event arrives.
    ///
    pub fn next(&self) -> Result<Event<KeyEvent>> {
        Ok(self.rx.recv()?)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Drop for Handler {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(poller) = self.poller.take() {
            if poller.join().is_err() {
                error!("Terminal event polling thread panicked.");
            }
        }
    }
}

/// Handle a terminal event against the state current at handling time.
/// Returns false if exit was requested.
///
pub fn handle(state: &mut State, event: Event<KeyEvent>) -> bool {
    match event {
        Event::Input(key) => handle_key(state, key),
        Event::Click { column, row } => {
            handle_click(state, column, row);
            true
        }
        Event::Tick => {
            state.advance_spinner_index();
            true
        }
    }
}

/// Route a key press to the current view. Returns false if exit was
/// requested.
///
pub fn handle_key(state: &mut State, event: KeyEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return true;
    }
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (event.code, event.modifiers) {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }
    match *state.current_view() {
        View::Lists => handle_lists_key(state, event),
        View::NewList | View::EditList => {
            handle_list_form_key(state, event);
            true
        }
        View::NewTask | View::EditTask => {
            handle_task_form_key(state, event);
            true
        }
    }
}

/// Select the list whose roster entry was clicked. Clicks elsewhere, or
/// outside the listing view, are ignored.
///
pub fn handle_click(state: &mut State, column: u16, row: u16) {
    if *state.current_view() != View::Lists {
        return;
    }
    match ui::list_at(state, column, row) {
        Some(list_id) => {
            debug!("Processing select list click at ({}, {})...", column, row);
            state.select_list(&list_id);
        }
        None => debug!("Skipping click at ({}, {})...", column, row),
    }
}

fn handle_lists_key(state: &mut State, event: KeyEvent) -> bool {
    if state.is_debug_mode() {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.previous_debug();
                return true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.next_debug();
                return true;
            }
            KeyCode::Char('y') => {
                debug!("Processing copy debug log event '{:?}'...", event);
                if let Some(entry) = state.get_current_debug() {
                    copy_to_clipboard(entry);
                }
                return true;
            }
            KeyCode::Esc => {
                state.toggle_debug_mode();
                return true;
            }
            _ => (),
        }
    }
    match event.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            debug!("Processing previous list event '{:?}'...", event);
            state.move_focus(FocusDirection::Previous);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            debug!("Processing next list event '{:?}'...", event);
            state.move_focus(FocusDirection::Next);
        }
        KeyCode::Tab | KeyCode::Char('f') => {
            debug!("Processing toggle filter event '{:?}'...", event);
            state.toggle_filter();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_task_index();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_task_index();
        }
        KeyCode::Enter => {
            debug!("Processing edit task event '{:?}'...", event);
            state.open_edit_task();
        }
        KeyCode::Char('e') => {
            debug!("Processing edit list event '{:?}'...", event);
            state.open_edit_list();
        }
        KeyCode::Char('n') => {
            debug!("Processing new list event '{:?}'...", event);
            state.open_new_list();
        }
        KeyCode::Char('a') => {
            debug!("Processing new task event '{:?}'...", event);
            state.open_new_task();
        }
        KeyCode::Char('r') => {
            debug!("Processing refresh event '{:?}'...", event);
            state.refresh_lists();
        }
        KeyCode::Char('d') => {
            debug!("Processing toggle log panel event '{:?}'...", event);
            state.toggle_debug_mode();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
    true
}

fn handle_list_form_key(state: &mut State, event: KeyEvent) {
    match (event.code, event.modifiers) {
        (KeyCode::Esc, _) => {
            debug!("Processing cancel form event '{:?}'...", event);
            state.close_form();
        }
        (KeyCode::Enter, _) => {
            debug!("Processing submit form event '{:?}'...", event);
            state.submit_form();
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            debug!("Processing delete event '{:?}'...", event);
            state.delete_form_entity();
        }
        (KeyCode::Backspace, _) => {
            if let Some(form) = state.list_form_mut() {
                form.remove_title_char();
            }
        }
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            if let Some(form) = state.list_form_mut() {
                form.add_title_char(c);
            }
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}

fn handle_task_form_key(state: &mut State, event: KeyEvent) {
    match (event.code, event.modifiers) {
        (KeyCode::Esc, _) => {
            debug!("Processing cancel form event '{:?}'...", event);
            state.close_form();
        }
        (KeyCode::Enter, KeyModifiers::ALT) => {
            if let Some(form) = state.task_form_mut() {
                form.insert_newline();
            }
        }
        (KeyCode::Enter, _) => {
            debug!("Processing submit form event '{:?}'...", event);
            state.submit_form();
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            debug!("Processing delete event '{:?}'...", event);
            state.delete_form_entity();
        }
        (KeyCode::Tab, _) => {
            if let Some(form) = state.task_form_mut() {
                form.next_field();
            }
        }
        (KeyCode::BackTab, _) => {
            if let Some(form) = state.task_form_mut() {
                form.previous_field();
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(form) = state.task_form_mut() {
                form.remove_char();
            }
        }
        (KeyCode::Left, _) | (KeyCode::Right, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
            if let Some(form) = state.task_form_mut() {
                if form.field() == TaskField::Done {
                    form.toggle_done();
                } else {
                    form.move_detail_cursor(match event.code {
                        KeyCode::Left => CursorMove::Back,
                        KeyCode::Right => CursorMove::Forward,
                        KeyCode::Up => CursorMove::Up,
                        _ => CursorMove::Down,
                    });
                }
            }
        }
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            if let Some(form) = state.task_form_mut() {
                form.add_char(c);
            }
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}

fn copy_to_clipboard(entry: String) {
    match ClipboardContext::new() {
        Ok(mut ctx) => match ctx.set_contents(entry) {
            Ok(_) => info!("Log entry copied to clipboard"),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        },
        Err(e) => warn!("Failed to initialize clipboard: {}", e),
    }
}
