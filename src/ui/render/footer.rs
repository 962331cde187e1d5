use super::Frame;
use crate::state::{State, View};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints shown for the given view.
///
fn hints(view: View, debug_mode: bool) -> &'static str {
    match view {
        View::Lists if debug_mode => " j/k: ログ移動  y: コピー  d/Esc: ログを閉じる  q: 終了",
        View::Lists => {
            " ←/→: リスト切替  f: 表示切替  ↑/↓: タスク選択  Enter: タスク編集  e: リスト編集  n: リスト作成  a: タスク作成  r: 更新  d: ログ  q: 終了"
        }
        View::NewList | View::NewTask => " Tab: 項目移動  Enter: 保存  Esc: キャンセル",
        View::EditList | View::EditTask => {
            " Tab: 項目移動  Enter: 保存  Ctrl+D: 削除  Esc: キャンセル"
        }
    }
}

/// Render footer with the mode label and the key hints of the current view.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let view = *state.current_view();
    let theme = state.get_theme();
    let (label, color) = if state.is_debug_mode() {
        (" LOG ", theme.footer_debug.to_color())
    } else if view.is_form() {
        (" EDIT ", theme.footer_edit.to_color())
    } else {
        (" LIST ", theme.primary.to_color())
    };
    let line = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.footer_normal.to_color())
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            hints(view, state.is_debug_mode()),
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), size);
}
