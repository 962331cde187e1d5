//! Navigation-related state types.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Lists,
    NewList,
    EditList,
    NewTask,
    EditTask,
}

impl View {
    /// Return whether the view is one of the form views.
    ///
    pub fn is_form(&self) -> bool {
        !matches!(self, View::Lists)
    }

    /// Return the heading shown above the view.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            View::Lists => "リスト一覧",
            View::NewList => "リスト新規作成",
            View::EditList => "リスト編集",
            View::NewTask => "タスク新規作成",
            View::EditTask => "タスク編集",
        }
    }
}
