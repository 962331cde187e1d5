use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Frames of the loading spinner, advanced once per terminal tick.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Return a centered spinner paragraph for an area of the given height.
///
pub fn widget(state: &State, height: u16) -> Paragraph<'static> {
    let frame = FRAMES[*state.get_spinner_index() % FRAMES.len()];
    let mut lines = vec![Line::from(""); (height.saturating_sub(2) / 2) as usize];
    lines.push(Line::from(Span::styled(
        format!("{} 読み込み中...", frame),
        styling::normal_text_style(state.get_theme()),
    )));
    Paragraph::new(lines).alignment(Alignment::Center)
}
