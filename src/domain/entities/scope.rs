use super::manifest::{paths, ManifestDocument};
use crate::common::result::GitOpsResult;
use crate::domain::value_objects::api_url::ApiUrl;

/// アプリケーションAPIのエンドポイント
pub const APPLICATION_ENDPOINT: &str = "applications";

/// 1回の実行で使用するスコープパラメータ
///
/// アカウントはクライアントコンテキストから、残りはマニフェストとCLIフラグから取得する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationScope {
    pub account_identifier: String,
    pub org_identifier: String,
    pub project_identifier: String,
    pub cluster_identifier: String,
    pub repo_identifier: String,
    pub agent_identifier: String,
    pub application_name: String,
}

impl ApplicationScope {
    /// マニフェストから識別子を抽出してスコープを作成
    pub fn from_manifest(
        manifest: &ManifestDocument,
        account_identifier: impl Into<String>,
        agent_identifier: impl Into<String>,
    ) -> GitOpsResult<Self> {
        Ok(Self {
            account_identifier: account_identifier.into(),
            org_identifier: manifest.get_string(paths::ORG_IDENTIFIER)?,
            project_identifier: manifest.get_string(paths::PROJECT_IDENTIFIER)?,
            cluster_identifier: manifest.get_string(paths::CLUSTER_IDENTIFIER)?,
            repo_identifier: manifest.get_string(paths::REPO_IDENTIFIER)?,
            agent_identifier: agent_identifier.into(),
            application_name: manifest.get_string(paths::NAME)?,
        })
    }

    /// アプリケーション単体のパスセグメント（`{agent}/applications/{name}`）
    ///
    /// 各識別子は1つのセグメントとしてエスケープされる。
    pub fn resource_segments(&self) -> [&str; 3] {
        [
            self.agent_identifier.as_str(),
            APPLICATION_ENDPOINT,
            self.application_name.as_str(),
        ]
    }

    /// 作成用URL（routingIdを含まない）
    pub fn create_url(&self, base: &str) -> GitOpsResult<ApiUrl> {
        ApiUrl::build(
            base,
            &[self.agent_identifier.as_str(), APPLICATION_ENDPOINT],
            &[
                ("accountIdentifier", self.account_identifier.as_str()),
                ("orgIdentifier", self.org_identifier.as_str()),
                ("projectIdentifier", self.project_identifier.as_str()),
                ("clusterIdentifier", self.cluster_identifier.as_str()),
                ("repoIdentifier", self.repo_identifier.as_str()),
            ],
        )
    }

    /// 同期用URL
    pub fn sync_url(&self, base: &str) -> GitOpsResult<ApiUrl> {
        ApiUrl::build(
            base,
            &[
                self.agent_identifier.as_str(),
                APPLICATION_ENDPOINT,
                self.application_name.as_str(),
                "sync",
            ],
            &[
                ("routingId", self.account_identifier.as_str()),
                ("accountIdentifier", self.account_identifier.as_str()),
                ("orgIdentifier", self.org_identifier.as_str()),
                ("projectIdentifier", self.project_identifier.as_str()),
            ],
        )
    }

    /// 更新（PUT）用URL
    pub fn update_url(&self, base: &str) -> GitOpsResult<ApiUrl> {
        ApiUrl::build(
            base,
            &self.resource_segments(),
            &[
                ("routingId", self.account_identifier.as_str()),
                ("accountIdentifier", self.account_identifier.as_str()),
                ("orgIdentifier", self.org_identifier.as_str()),
                ("projectIdentifier", self.project_identifier.as_str()),
                ("repoIdentifier", self.repo_identifier.as_str()),
                ("clusterIdentifier", self.cluster_identifier.as_str()),
            ],
        )
    }
}
