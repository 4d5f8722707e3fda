use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;
use std::fmt;
use std::time::Duration;
use validator::Validate;

/// デフォルトのゲートウェイURL
pub const DEFAULT_BASE_URL: &str = "https://app.harness.io/gateway";

/// GitOpsサービスのパス（末尾にエージェント識別子が付く）
pub const GITOPS_SERVICE_PATH: &str = "gitops/api/v1/agents/";

/// NGサービスのパス
pub const NG_SERVICE_PATH: &str = "ng/api";

/// デフォルトのHTTPタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 1回の実行で共有される接続情報
///
/// 起動時に一度だけ構築され、各ユースケースへ参照で渡される。
#[derive(Clone, Validate)]
pub struct ClientContext {
    /// アカウント識別子
    #[validate(length(min = 1, message = "account identifier must not be empty"))]
    account_id: String,

    /// APIトークン
    #[validate(length(min = 1, message = "API key must not be empty"))]
    api_key: String,

    /// ゲートウェイのベースURL
    #[validate(url(message = "base URL must be an absolute URL"))]
    base_url: String,

    /// HTTPタイムアウト
    timeout: Duration,
}

impl ClientContext {
    /// 新しいコンテキストを作成し、検証する
    pub fn new(
        account_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> GitOpsResult<Self> {
        let context = Self {
            account_id: account_id.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        };

        context
            .validate()
            .map_err(|e| GitOpsError::config_error_with_source("Invalid client settings", e))?;

        Ok(context)
    }

    /// タイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GitOps APIのベースURL（エージェント識別子はパスセグメントとして後から付加する）
    pub fn gitops_base_url(&self) -> String {
        format!("{}/{}", self.base_url, GITOPS_SERVICE_PATH)
    }

    /// NG APIのベースURL
    pub fn ng_base_url(&self) -> String {
        format!("{}/{}", self.base_url, NG_SERVICE_PATH)
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
