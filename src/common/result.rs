use crate::common::error::GitOpsError;

/// クレート全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use gitops_apply::common::result::GitOpsResult;
/// use gitops_apply::common::error::GitOpsError;
///
/// fn example_function() -> GitOpsResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> GitOpsResult<()> {
///     Err(GitOpsError::missing_field("gitops.name"))
/// }
/// ```
pub type GitOpsResult<T> = Result<T, GitOpsError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// Noneの場合はMissingFieldエラーに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use gitops_apply::common::result::{GitOpsResult, OptionExt};
    ///
    /// let none_value: Option<&str> = None;
    /// let result: GitOpsResult<&str> = none_value.ok_or_missing_field("gitops.name");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_missing_field(self, path: impl Into<String>) -> GitOpsResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_field(self, path: impl Into<String>) -> GitOpsResult<T> {
        self.ok_or_else(|| GitOpsError::missing_field(path))
    }
}
