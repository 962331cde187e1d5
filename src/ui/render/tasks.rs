use super::widgets::spinner;
use super::Frame;
use crate::state::{format_limit, status_label, Phase, State, VisibilityFilter};
use crate::ui::widgets::styling;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};

const BLOCK_TITLE: &str = "タスク";

const FILTERS: [VisibilityFilter; 2] = [VisibilityFilter::Incomplete, VisibilityFilter::Complete];

/// Render the visibility filter selector above the roster of visible tasks.
/// Both filter values share the same roster rendering.
///
pub fn tasks(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(2)])
        .split(size);
    filter_selector(frame, rows[0], state);
    roster(frame, rows[1], state);
}

fn filter_selector(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let current = state.selection().visibility_filter();
    let selector = Tabs::new(FILTERS.iter().map(|filter| Line::from(filter.label())).collect::<Vec<_>>())
        .style(styling::muted_text_style(theme))
        .highlight_style(styling::active_list_item_style(theme))
        .select(FILTERS.iter().position(|filter| *filter == current).unwrap_or(0));
    frame.render_widget(selector, size);
}

fn roster(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(&theme))
        .title(BLOCK_TITLE);

    match state.selection().phase() {
        Phase::Uninitialized | Phase::ListsLoaded => {
            frame.render_widget(block, size);
            return;
        }
        Phase::TasksLoading => {
            frame.render_widget(spinner::widget(state, size.height).block(block), size);
            return;
        }
        Phase::TasksLoaded => (),
    }

    let now = Utc::now();
    let items: Vec<ListItem> = state
        .selection()
        .visible_tasks()
        .iter()
        .map(|task| {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!("[{}] ", status_label(task.done)),
                    styling::status_style(&theme, task.done),
                ),
                Span::styled(task.title.to_owned(), styling::normal_text_style(&theme)),
            ])];
            // Tasks without a deadline get no limit line.
            let limit = format_limit(task.limit, now);
            if !limit.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", limit),
                    styling::muted_text_style(&theme),
                )));
            }
            lines.extend(task.detail.lines().map(|line| {
                Line::from(Span::styled(
                    format!("    {}", line),
                    styling::normal_text_style(&theme),
                ))
            }));
            ListItem::new(lines)
        })
        .collect();

    if items.is_empty() {
        let text = Paragraph::new("タスクがありません")
            .style(styling::muted_text_style(&theme))
            .block(block);
        frame.render_widget(text, size);
        return;
    }

    let list = List::new(items)
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::active_list_item_style(&theme))
        .highlight_symbol("> ")
        .block(block);
    frame.render_stateful_widget(list, size, state.get_tasks_list_state());
}
