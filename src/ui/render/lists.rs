use super::widgets::spinner;
use super::Frame;
use crate::state::{entry_id, Phase, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

const BLOCK_TITLE: &str = "リスト";

/// Height of the list roster, borders included. The roster is the top row of
/// the listing view.
///
pub const ROSTER_HEIGHT: u16 = 3;

/// Row holding the roster entries, inside the top border.
///
const ENTRY_ROW: u16 = 1;

/// Width of the padding drawn on each side of an entry.
///
const PADDING_WIDTH: u16 = 1;

/// Width of the divider drawn between entries.
///
const DIVIDER_WIDTH: u16 = 1;

/// Return the identifier of the list whose roster entry is drawn at the given
/// screen cell of the listing view. Padding counts as part of an entry;
/// dividers and borders do not.
///
pub fn list_at(state: &State, column: u16, row: u16) -> Option<String> {
    if row != ENTRY_ROW {
        return None;
    }
    let lists = state.selection().lists();
    let titles = lists.iter().map(|list| list.title.as_str());
    entry_at(titles, column).and_then(|index| lists.get(index).map(|list| list.id.to_owned()))
}

fn entry_at<'a>(titles: impl IntoIterator<Item = &'a str>, column: u16) -> Option<usize> {
    // Entries start right after the left border.
    let mut start: u16 = 1;
    for (index, title) in titles.into_iter().enumerate() {
        let title_width = u16::try_from(Line::from(title).width()).unwrap_or(u16::MAX);
        let end = start
            .saturating_add(title_width)
            .saturating_add(2 * PADDING_WIDTH);
        if (start..end).contains(&column) {
            return Some(index);
        }
        start = end.saturating_add(DIVIDER_WIDTH);
    }
    None
}

/// Render the list roster. Exactly one entry, the one holding focus, is
/// highlighted.
///
pub fn lists(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style()));

    let selection = state.selection();
    if selection.phase() == Phase::Uninitialized && selection.is_fetching_lists() {
        frame.render_widget(spinner::widget(state, size.height).block(block), size);
        return;
    }
    if selection.lists().is_empty() {
        let text = Paragraph::new("リストがありません")
            .style(styling::muted_text_style(theme))
            .block(block);
        frame.render_widget(text, size);
        return;
    }

    let titles: Vec<Line> = selection
        .lists()
        .iter()
        .map(|list| Line::from(list.title.to_owned()))
        .collect();
    let mut roster = Tabs::new(titles)
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::selected_item_style(theme))
        .block(block);
    let focused = selection.focused_entry_id();
    let highlighted = selection
        .lists()
        .iter()
        .position(|list| Some(entry_id(&list.id)) == focused);
    if let Some(index) = highlighted {
        roster = roster.select(index);
    }
    frame.render_widget(roster, size);
}
