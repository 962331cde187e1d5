//! State management-specific error types.

use crate::api::ApiError;

/// Failures of the fetches that populate state. The display text is the
/// message surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The list collection could not be loaded
    #[error("リストの取得に失敗しました。{0}")]
    Lists(#[source] ApiError),

    /// The tasks of the selected list could not be loaded
    #[error("タスクの取得に失敗しました。{0}")]
    Tasks(#[source] ApiError),

    /// A single list could not be loaded into a form
    #[error("リスト情報の取得に失敗しました。{0}")]
    List(#[source] ApiError),

    /// A single task could not be loaded into a form
    #[error("タスク情報の取得に失敗しました。{0}")]
    Task(#[source] ApiError),
}

/// Failures of create, update and delete requests issued from forms.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("作成に失敗しました。{0}")]
    Create(#[source] ApiError),

    #[error("更新に失敗しました。{0}")]
    Update(#[source] ApiError),

    #[error("削除に失敗しました。{0}")]
    Delete(#[source] ApiError),
}

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No list is selected
    #[error("リストが選択されていません。")]
    NoSelection,

    /// No task is highlighted in the roster
    #[error("タスクが選択されていません。")]
    NoTaskHighlighted,

    /// Title field is blank
    #[error("タイトルを入力してください。")]
    EmptyTitle,

    /// Deadline input could not be parsed
    #[error("期限の形式が正しくありません（YYYY-MM-DD HH:MM）: {0}")]
    InvalidLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_fetch_error_display() {
        let error = FetchError::Lists(api_error());
        assert!(error.to_string().starts_with("リストの取得に失敗しました。"));
        assert!(error.to_string().contains("500"));

        let error = FetchError::Tasks(api_error());
        assert!(error.to_string().starts_with("タスクの取得に失敗しました。"));

        let error = FetchError::List(api_error());
        assert!(error.to_string().starts_with("リスト情報の取得に失敗しました。"));

        let error = FetchError::Task(api_error());
        assert!(error.to_string().starts_with("タスク情報の取得に失敗しました。"));
    }

    #[test]
    fn test_mutation_error_display() {
        assert!(MutationError::Create(api_error())
            .to_string()
            .starts_with("作成に失敗しました。"));
        assert!(MutationError::Update(api_error())
            .to_string()
            .starts_with("更新に失敗しました。"));
        assert!(MutationError::Delete(api_error())
            .to_string()
            .contains("boom"));
    }

    #[test]
    fn test_state_error_display() {
        let error = StateError::InvalidLimit("tomorrow".to_string());
        assert!(error.to_string().contains("tomorrow"));
        assert!(StateError::EmptyTitle.to_string().contains("タイトル"));
    }
}
