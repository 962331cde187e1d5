use super::Frame;
use crate::state::{State, TaskField, LIMIT_INPUT_FORMAT};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

/// Render the task create/edit form.
///
pub fn task_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let view = *state.current_view();
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(&theme))
        .title(Span::styled(view.title(), styling::banner_style(&theme)));
    let inner = outer.inner(size);
    frame.render_widget(outer, size);

    let form = match state.task_form_mut() {
        Some(form) => form,
        None => return,
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let active = form.field();
    let field_block = |field: TaskField, title: String| {
        let border_style = if field == active {
            styling::active_block_border_style(&theme)
        } else {
            styling::normal_block_border_style(&theme)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
    };
    let cursor = |field: TaskField| if field == active { "_" } else { "" };

    let title = Paragraph::new(format!("{}{}", form.title(), cursor(TaskField::Title)))
        .style(styling::normal_text_style(&theme))
        .block(field_block(TaskField::Title, "タイトル".to_string()));
    frame.render_widget(title, rows[0]);

    let limit = Paragraph::new(format!("{}{}", form.limit_input(), cursor(TaskField::Limit)))
        .style(styling::normal_text_style(&theme))
        .block(field_block(
            TaskField::Limit,
            format!("期限 ({})", LIMIT_INPUT_FORMAT),
        ));
    frame.render_widget(limit, rows[2]);

    let done = Paragraph::new(if form.done() { "[x] 完了" } else { "[ ] 完了" })
        .style(styling::normal_text_style(&theme))
        .block(field_block(TaskField::Done, "状態".to_string()));
    frame.render_widget(done, rows[3]);

    if let Some(message) = form.error_message() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.to_owned(),
                styling::error_text_style(&theme),
            )),
            rows[4],
        );
    }

    let detail_block = field_block(TaskField::Detail, "詳細 (Alt+Enter: 改行)".to_string());
    let cursor_style = if active == TaskField::Detail {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let textarea = form.detail_textarea();
    textarea.set_block(detail_block);
    textarea.set_cursor_style(cursor_style);
    textarea.set_cursor_line_style(Style::default());
    frame.render_widget(textarea.widget(), rows[1]);
}
