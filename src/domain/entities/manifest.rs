use crate::common::error::GitOpsError;
use crate::common::result::{GitOpsResult, OptionExt};
use serde_json::Value;
use std::path::PathBuf;

/// エージェント識別子のプレースホルダー
///
/// マニフェスト本文中のこの文字列は、解析前に実際のエージェント識別子へ置換される。
pub const AGENT_IDENTIFIER_PLACEHOLDER: &str = "GITOPS_AGENT_IDENTIFIER_PLACEHOLDER";

/// マニフェスト内の固定キーパス
pub mod paths {
    pub const NAME: &[&str] = &["gitops", "name"];
    pub const ORG_IDENTIFIER: &[&str] = &["gitops", "orgIdentifier"];
    pub const PROJECT_IDENTIFIER: &[&str] = &["gitops", "projectIdentifier"];
    pub const CLUSTER_IDENTIFIER: &[&str] = &["gitops", "clusterIdentifier"];
    pub const REPO_IDENTIFIER: &[&str] = &["gitops", "repoIdentifier"];

    pub const CLUSTER_NAME: &[&str] = &["gitops", "application", "metadata", "clusterName"];
    pub const ENV_REF: &[&str] = &[
        "gitops",
        "application",
        "metadata",
        "labels",
        "harness.io/envRef",
    ];
    pub const SERVICE_REF: &[&str] = &[
        "gitops",
        "application",
        "metadata",
        "labels",
        "harness.io/serviceRef",
    ];

    pub const SOURCE_REPO_URL: &[&str] = &["gitops", "application", "spec", "source", "repoURL"];
    pub const SOURCE_PATH: &[&str] = &["gitops", "application", "spec", "source", "path"];
    pub const SOURCE_TARGET_REVISION: &[&str] =
        &["gitops", "application", "spec", "source", "targetRevision"];

    pub const DESTINATION_SERVER: &[&str] =
        &["gitops", "application", "spec", "destination", "server"];
    pub const DESTINATION_NAMESPACE: &[&str] =
        &["gitops", "application", "spec", "destination", "namespace"];
}

/// 汎用ドキュメントツリーから文字列フィールドを取り出す
///
/// キーを順にたどり、途中のキーが存在しない場合や最終値が文字列でない場合は
/// `GitOpsError::MissingField` を返す。デフォルト値は使わない。
pub fn get_nested_str<'a>(document: &'a Value, path: &[&str]) -> GitOpsResult<&'a str> {
    let mut current = document;
    for key in path {
        current = current
            .as_object()
            .and_then(|map| map.get(*key))
            .ok_or_missing_field(dotted(path))?;
    }
    current.as_str().ok_or_missing_field(dotted(path))
}

fn dotted(path: &[&str]) -> String {
    path.join(".")
}

/// 本文中のプレースホルダーをすべて置換する
pub fn substitute_placeholder(content: &str, placeholder: &str, value: &str) -> String {
    content.replace(placeholder, value)
}

/// 解析済みのマニフェスト
///
/// YAMLを汎用JSON値として保持し、必須フィールドへの型付きアクセスを提供する。
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    root: Value,
}

impl ManifestDocument {
    /// YAML文字列からマニフェストを解析
    pub fn parse(content: &str) -> GitOpsResult<Self> {
        Self::parse_with_path(content, None)
    }

    /// ファイルパス付きでYAML文字列を解析（エラーメッセージ用）
    pub fn parse_with_path(content: &str, file_path: Option<PathBuf>) -> GitOpsResult<Self> {
        let root: Value = serde_yaml::from_str(content).map_err(|e| {
            GitOpsError::manifest_error_with_source(
                "Failed to convert manifest YAML into a document",
                file_path.clone(),
                e,
            )
        })?;

        if !root.is_object() {
            return Err(GitOpsError::manifest_error(
                "Manifest must be a mapping with a top-level `gitops` key",
                file_path,
            ));
        }

        Ok(Self { root })
    }

    /// 必須の文字列フィールドを取得
    pub fn get(&self, path: &[&str]) -> GitOpsResult<&str> {
        get_nested_str(&self.root, path)
    }

    /// 必須の文字列フィールドを所有権付きで取得
    pub fn get_string(&self, path: &[&str]) -> GitOpsResult<String> {
        self.get(path).map(str::to_string)
    }
}
