use super::lists::ROSTER_HEIGHT;
use super::{footer, list_form, lists, log, status, task_form, tasks, Frame};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

/// Height of the log panel when it is shown.
///
const LOG_HEIGHT: u16 = 10;

/// Render the whole application according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let log_height = if state.is_debug_mode() { LOG_HEIGHT } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .split(size);

    match *state.current_view() {
        View::Lists => {
            let main = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(ROSTER_HEIGHT), Constraint::Min(3)])
                .split(rows[0]);
            lists(frame, main[0], state);
            tasks(frame, main[1], state);
            status(frame, rows[1], state);
        }
        View::NewList | View::EditList => list_form(frame, rows[0], state),
        View::NewTask | View::EditTask => task_form(frame, rows[0], state),
    }

    if state.is_debug_mode() {
        log(frame, rows[2], state);
    }
    footer(frame, rows[3], state);
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiError, ListSummary, Task};
    use crate::events::network::Event as NetworkEvent;
    use crate::logger::LogBuffer;
    use crate::state::{FetchError, ListRequest, State, TaskRequest};
    use crate::ui::Theme;
    use chrono::{Duration, Utc};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::mpsc::{self, Receiver};

    /// Concatenate the non-blank cells so wide characters read contiguously.
    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .filter(|symbol| !symbol.trim().is_empty())
            .collect::<String>()
    }

    fn draw(state: &mut State) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| crate::ui::render(frame, state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn connected() -> (State, Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        (State::new(tx, LogBuffer::new(), Theme::default()), rx)
    }

    fn list_request(rx: &Receiver<NetworkEvent>) -> ListRequest {
        match rx.try_recv() {
            Ok(NetworkEvent::Lists(request)) => request,
            other => panic!("expected list request, got {:?}", other),
        }
    }

    fn task_request(rx: &Receiver<NetworkEvent>) -> TaskRequest {
        match rx.try_recv() {
            Ok(NetworkEvent::Tasks(request)) => request,
            other => panic!("expected task request, got {:?}", other),
        }
    }

    /// Load the lists "Home" and "Work" and return the task request for Home.
    fn home_and_work(state: &mut State, rx: &Receiver<NetworkEvent>) -> TaskRequest {
        state.load_lists();
        let request = list_request(rx);
        state.apply_lists(
            &request,
            Ok(vec![
                ListSummary {
                    id: "1".to_string(),
                    title: "Home".to_string(),
                },
                ListSummary {
                    id: "2".to_string(),
                    title: "Work".to_string(),
                },
            ]),
        );
        task_request(rx)
    }

    #[test]
    fn renders_spinner_before_lists_arrive() {
        let (mut state, _rx) = connected();
        state.load_lists();
        assert!(draw(&mut state).contains("読み込み中"));
    }

    #[test]
    fn failed_initial_load_stops_spinner() {
        let (mut state, rx) = connected();
        state.load_lists();
        let request = list_request(&rx);
        state.apply_lists(
            &request,
            Err(FetchError::Lists(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            })),
        );
        let screen = draw(&mut state);
        assert!(!screen.contains("読み込み中"));
        assert!(screen.contains("リストがありません"));
    }

    #[test]
    fn failed_task_fetch_for_new_selection_stops_spinner() {
        let (mut state, rx) = connected();
        let first = home_and_work(&mut state, &rx);
        state.apply_tasks(&first, Ok(vec![]));
        state.select_list("2");
        let request = task_request(&rx);
        assert!(draw(&mut state).contains("読み込み中"));

        state.apply_tasks(
            &request,
            Err(FetchError::Tasks(ApiError::Status {
                status: 503,
                message: "unavailable".to_string(),
            })),
        );
        let screen = draw(&mut state);
        assert!(!screen.contains("読み込み中"));
        assert!(screen.contains("タスクがありません"));
    }

    #[test]
    fn task_without_deadline_has_no_limit_text() {
        let (mut state, rx) = connected();
        let request = home_and_work(&mut state, &rx);
        state.apply_tasks(
            &request,
            Ok(vec![Task {
                id: "a".to_string(),
                title: "Laundry".to_string(),
                detail: String::new(),
                done: false,
                limit: None,
            }]),
        );
        let screen = draw(&mut state);
        assert!(screen.contains("Laundry"));
        assert!(!screen.contains("期限"));
    }

    #[test]
    fn renders_lists_and_visible_tasks() {
        let (mut state, rx) = connected();
        let request = home_and_work(&mut state, &rx);
        let applied = state.apply_tasks(
            &request,
            Ok(vec![
                Task {
                    id: "a".to_string(),
                    title: "Laundry".to_string(),
                    detail: String::new(),
                    done: false,
                    limit: Some(Utc::now() + Duration::days(2)),
                },
                Task {
                    id: "b".to_string(),
                    title: "Dishes".to_string(),
                    detail: String::new(),
                    done: true,
                    limit: None,
                },
            ]),
        );
        assert!(applied);

        let screen = draw(&mut state);
        assert!(screen.contains("Home"));
        assert!(screen.contains("Work"));
        assert!(screen.contains("Laundry"));
        assert!(!screen.contains("Dishes"));
    }

    #[test]
    fn renders_list_form() {
        let mut state = State::default();
        state.open_new_list();
        assert!(draw(&mut state).contains("リスト新規作成"));
    }
}
