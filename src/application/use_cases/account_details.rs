use tracing::debug;

use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;
use crate::domain::entities::client_context::ClientContext;
use crate::domain::value_objects::api_url::ApiUrl;
use crate::infrastructure::http::api_client::GitOpsApi;
use crate::infrastructure::http::response::ResponseBody;

/// アカウント参照の結果
#[derive(Debug, Clone, PartialEq)]
pub enum AccountLookup {
    /// 取得に成功（診断用のため内容は使用しない）
    Found,
    /// 取得に失敗
    Failed {
        /// HTTPステータス（応答がなかった場合はNone）
        status: Option<u16>,
        /// 失敗応答の本文（JSONでなかった場合は空）
        response: ResponseBody,
        /// 失敗の説明
        reason: String,
    },
}

/// アカウント詳細を取得する診断用ユースケース
pub struct AccountDetailsUseCase<'a> {
    context: &'a ClientContext,
    api: &'a dyn GitOpsApi,
}

impl<'a> AccountDetailsUseCase<'a> {
    pub fn new(context: &'a ClientContext, api: &'a dyn GitOpsApi) -> Self {
        Self { context, api }
    }

    /// `{ng}/accounts/{account}?accountIdentifier={account}`
    pub fn account_url(&self) -> GitOpsResult<ApiUrl> {
        let account = self.context.account_id();
        ApiUrl::build(
            &self.context.ng_base_url(),
            &["accounts", account],
            &[("accountIdentifier", account)],
        )
    }

    pub async fn execute(&self) -> GitOpsResult<AccountLookup> {
        let url = self.account_url()?;

        match self.api.get(&url).await {
            Ok(_) => {
                debug!(account = %self.context.account_id(), "account details fetched");
                Ok(AccountLookup::Found)
            }
            Err(e) => {
                let (status, response) = match &e {
                    GitOpsError::ApiError { status, response, .. } => {
                        (Some(*status), response.clone().unwrap_or_default())
                    }
                    _ => (None, ResponseBody::default()),
                };
                Ok(AccountLookup::Failed {
                    status,
                    response,
                    reason: e.to_string(),
                })
            }
        }
    }
}
