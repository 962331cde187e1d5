use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

/// Render the list create/edit form.
///
pub fn list_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let view = *state.current_view();
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(view.title(), styling::banner_style(theme)));
    let inner = outer.inner(size);
    frame.render_widget(outer, size);

    let form = match state.list_form() {
        Some(form) => form,
        None => return,
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let title = Paragraph::new(format!("{}_", form.title()))
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme))
                .title("タイトル"),
        );
    frame.render_widget(title, rows[0]);

    if let Some(message) = form.error_message() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.to_owned(),
                styling::error_text_style(theme),
            )),
            rows[1],
        );
    }
}
