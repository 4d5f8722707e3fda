use std::path::{Path, PathBuf};

use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;

/// マニフェストファイルの読み込み
#[derive(Debug, Default, Clone)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    /// マニフェストファイルを文字列として読み込む
    ///
    /// 空のファイルはマニフェストエラーとして扱う。
    pub async fn read_manifest(&self, path: &Path) -> GitOpsResult<String> {
        if !path.exists() {
            return Err(GitOpsError::filesystem_error(
                format!("Manifest file not found: {}", path.display()),
                Some(path.to_path_buf()),
            ));
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GitOpsError::filesystem_error_with_source(
                format!("Failed to read manifest: {}", path.display()),
                Some(path.to_path_buf()),
                e,
            )
        })?;

        if content.trim().is_empty() {
            return Err(GitOpsError::manifest_error(
                "Manifest file is empty",
                Some(PathBuf::from(path)),
            ));
        }

        Ok(content)
    }
}
