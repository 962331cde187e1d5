use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph};

/// Render the most recent error message of the listing view, if any.
///
pub fn status(frame: &mut Frame, size: Rect, state: &mut State) {
    if let Some(message) = state.selection().error_message() {
        let text = Paragraph::new(Span::styled(
            message.to_owned(),
            styling::error_text_style(state.get_theme()),
        ));
        frame.render_widget(text, size);
    }
}
