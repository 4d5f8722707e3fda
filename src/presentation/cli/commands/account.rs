use anyhow::Result;

use crate::application::use_cases::account_details::{AccountDetailsUseCase, AccountLookup};
use crate::domain::entities::client_context::ClientContext;
use crate::infrastructure::http::api_client::{GitOpsApi, HttpApiClient};

/// Handler for the `account` command
pub struct AccountCommand;

impl AccountCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, context: &ClientContext) -> Result<()> {
        let api = HttpApiClient::new(context)?;
        self.execute_with(context, &api).await
    }

    pub async fn execute_with(&self, context: &ClientContext, api: &dyn GitOpsApi) -> Result<()> {
        let use_case = AccountDetailsUseCase::new(context, api);

        if let AccountLookup::Failed { response, .. } = use_case.execute().await? {
            println!("Response status: {} ", response.status.as_deref().unwrap_or_default());
            println!("Response code: {} ", response.code.as_deref().unwrap_or_default());
            println!("Response resource: {} ", response.resource_display());
            println!("Response messages: {} ", response.messages_display());
        }

        Ok(())
    }
}

impl Default for AccountCommand {
    fn default() -> Self {
        Self::new()
    }
}
