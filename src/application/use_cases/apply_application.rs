use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::services::entity_prober::EntityProber;
use crate::common::error::GitOpsError;
use crate::domain::entities::{
    application::GitOpsApplication,
    client_context::ClientContext,
    manifest::{substitute_placeholder, ManifestDocument, AGENT_IDENTIFIER_PLACEHOLDER},
    scope::ApplicationScope,
};
use crate::infrastructure::filesystem::manifest_store::ManifestStore;
use crate::infrastructure::http::api_client::GitOpsApi;
use crate::infrastructure::terminal::prompt::InputPrompt;

/// Prompt shown when no usable agent identifier was supplied.
pub const AGENT_IDENTIFIER_PROMPT: &str = "Enter a valid AgentIdentifier:";

/// ApplyApplication関連のエラー
#[derive(Debug, Error)]
pub enum ApplyApplicationError {
    #[error("Please enter valid filename")]
    MissingManifestPath,

    #[error("Failed to load manifest: {0}")]
    ManifestUnreadable(#[source] GitOpsError),

    #[error("Please enter valid application yaml file: {0}")]
    InvalidManifest(#[source] GitOpsError),

    #[error("Agent identifier is required")]
    MissingAgentIdentifier {
        /// Set when the prompt itself failed.
        #[source]
        source: Option<GitOpsError>,
    },

    #[error(transparent)]
    MissingField(GitOpsError),

    #[error(transparent)]
    Internal(GitOpsError),
}

impl From<GitOpsError> for ApplyApplicationError {
    fn from(error: GitOpsError) -> Self {
        match error {
            GitOpsError::MissingField { .. } => Self::MissingField(error),
            other => Self::Internal(other),
        }
    }
}

/// 適用の設定
#[derive(Debug, Clone, Default)]
pub struct ApplyApplicationConfig {
    /// マニフェストファイルのパス
    pub manifest_file: Option<PathBuf>,

    /// エージェント識別子（未指定やプレースホルダーの場合は入力を求める）
    pub agent_identifier: Option<String>,
}

/// 調整処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// 新規作成に成功
    Created,
    /// 同期と更新の両方に成功
    Updated,
    /// 作成に失敗
    CreateFailed { reason: String },
    /// 更新前の同期に失敗（更新は実行していない）
    SyncFailed { reason: String },
    /// 同期には成功したが更新に失敗
    UpdateFailed { reason: String },
    /// 存在確認がHTTP応答を得られずに失敗（何も変更していない）
    ProbeFailed { reason: String },
}

/// 1回の適用の報告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub application_name: String,
    pub outcome: ReconcileOutcome,
}

impl ReconcileReport {
    fn new(scope: &ApplicationScope, outcome: ReconcileOutcome) -> Self {
        Self {
            application_name: scope.application_name.clone(),
            outcome,
        }
    }
}

/// Reason string for a failed remote call, preferring the server's own message.
pub fn failure_reason(error: &GitOpsError) -> String {
    match error {
        GitOpsError::ApiError { status, .. } => {
            match error.response_body().and_then(|body| body.summary()) {
                Some(summary) => format!("{} ({})", summary, status),
                None => format!("remote API returned {}", status),
            }
        }
        other => other.to_string(),
    }
}

/// GitOpsアプリケーションを作成または同期・更新するユースケース
pub struct ApplyApplicationUseCase<'a> {
    config: ApplyApplicationConfig,
    context: &'a ClientContext,
    api: &'a dyn GitOpsApi,
    prompt: &'a dyn InputPrompt,
    manifest_store: ManifestStore,
}

impl<'a> ApplyApplicationUseCase<'a> {
    pub fn new(
        config: ApplyApplicationConfig,
        context: &'a ClientContext,
        api: &'a dyn GitOpsApi,
        prompt: &'a dyn InputPrompt,
    ) -> Self {
        Self {
            config,
            context,
            api,
            prompt,
            manifest_store: ManifestStore::new(),
        }
    }

    /// マニフェストを読み込み、調整処理を実行する
    pub async fn execute(&self) -> Result<ReconcileReport, ApplyApplicationError> {
        let path = self
            .config
            .manifest_file
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ApplyApplicationError::MissingManifestPath)?;

        let raw = self
            .manifest_store
            .read_manifest(path)
            .await
            .map_err(ApplyApplicationError::ManifestUnreadable)?;

        let agent_identifier = self.resolve_agent_identifier()?;
        let content = substitute_placeholder(&raw, AGENT_IDENTIFIER_PLACEHOLDER, &agent_identifier);

        let manifest = ManifestDocument::parse_with_path(&content, Some(path.clone()))
            .map_err(ApplyApplicationError::InvalidManifest)?;

        self.reconcile(&manifest, &agent_identifier).await
    }

    /// 解析済みマニフェストに対して作成、または同期してから更新する
    ///
    /// 既存のアプリケーションでは必ず同期が更新より先に実行され、
    /// 同期に失敗した場合は更新を実行しない。
    pub async fn reconcile(
        &self,
        manifest: &ManifestDocument,
        agent_identifier: &str,
    ) -> Result<ReconcileReport, ApplyApplicationError> {
        let scope = ApplicationScope::from_manifest(manifest, self.context.account_id(), agent_identifier)?;
        let base_url = self.context.gitops_base_url();

        let create_url = scope.create_url(&base_url)?;
        let sync_url = scope.sync_url(&base_url)?;

        let prober = EntityProber::new(self.api, self.context.account_id());
        let exists = match prober
            .exists(
                &base_url,
                &scope.resource_segments(),
                &scope.project_identifier,
                &scope.org_identifier,
                &[("agentIdentifier", agent_identifier)],
            )
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                return Ok(ReconcileReport::new(
                    &scope,
                    ReconcileOutcome::ProbeFailed {
                        reason: failure_reason(&e),
                    },
                ))
            }
        };

        if !exists {
            info!(application = %scope.application_name, "application not found; creating");
            let payload = serde_json::to_value(GitOpsApplication::create_payload(manifest)?)
                .map_err(GitOpsError::from)?;

            let outcome = match self.api.post_json(&create_url, &payload).await {
                Ok(_) => ReconcileOutcome::Created,
                Err(e) => ReconcileOutcome::CreateFailed {
                    reason: failure_reason(&e),
                },
            };
            return Ok(ReconcileReport::new(&scope, outcome));
        }

        info!(application = %scope.application_name, "application found; syncing before update");
        let update_url = scope.update_url(&base_url)?;
        let update_payload = serde_json::to_value(GitOpsApplication::update_payload(manifest)?)
            .map_err(GitOpsError::from)?;
        let sync_payload = serde_json::to_value(GitOpsApplication::create_payload(manifest)?)
            .map_err(GitOpsError::from)?;

        if let Err(e) = self.api.post_json(&sync_url, &sync_payload).await {
            return Ok(ReconcileReport::new(
                &scope,
                ReconcileOutcome::SyncFailed {
                    reason: failure_reason(&e),
                },
            ));
        }
        debug!(application = %scope.application_name, "sync succeeded");

        let outcome = match self.api.put_json(&update_url, &update_payload).await {
            Ok(_) => ReconcileOutcome::Updated,
            Err(e) => ReconcileOutcome::UpdateFailed {
                reason: failure_reason(&e),
            },
        };
        Ok(ReconcileReport::new(&scope, outcome))
    }

    fn resolve_agent_identifier(&self) -> Result<String, ApplyApplicationError> {
        let supplied = self
            .config
            .agent_identifier
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != AGENT_IDENTIFIER_PLACEHOLDER);

        if let Some(id) = supplied {
            return Ok(id.to_string());
        }

        let answer = self
            .prompt
            .text_input(AGENT_IDENTIFIER_PROMPT)
            .map_err(|e| ApplyApplicationError::MissingAgentIdentifier { source: Some(e) })?;

        if answer.is_empty() || answer == AGENT_IDENTIFIER_PLACEHOLDER {
            return Err(ApplyApplicationError::MissingAgentIdentifier { source: None });
        }
        Ok(answer)
    }
}
