use tracing::debug;

use crate::common::result::GitOpsResult;
use crate::domain::value_objects::api_url::ApiUrl;
use crate::infrastructure::http::api_client::GitOpsApi;

/// Existence checks against the remote API.
///
/// A 2xx answer means the entity exists and any other HTTP answer means it
/// does not. A request that never got an HTTP answer is returned as an error
/// so a transient outage is not mistaken for "not found".
pub struct EntityProber<'a> {
    api: &'a dyn GitOpsApi,
    account_identifier: &'a str,
}

impl<'a> EntityProber<'a> {
    pub fn new(api: &'a dyn GitOpsApi, account_identifier: &'a str) -> Self {
        Self {
            api,
            account_identifier,
        }
    }

    /// Probe URL for `resource_segments` under `base_url`, scoped to the account,
    /// org and project, followed by `extra_params`.
    pub fn probe_url(
        &self,
        base_url: &str,
        resource_segments: &[&str],
        project_identifier: &str,
        org_identifier: &str,
        extra_params: &[(&str, &str)],
    ) -> GitOpsResult<ApiUrl> {
        let mut params: Vec<(&str, &str)> = vec![
            ("accountIdentifier", self.account_identifier),
            ("orgIdentifier", org_identifier),
            ("projectIdentifier", project_identifier),
        ];
        params.extend_from_slice(extra_params);

        ApiUrl::build(base_url, resource_segments, &params)
    }

    pub async fn exists(
        &self,
        base_url: &str,
        resource_segments: &[&str],
        project_identifier: &str,
        org_identifier: &str,
        extra_params: &[(&str, &str)],
    ) -> GitOpsResult<bool> {
        let url = self.probe_url(
            base_url,
            resource_segments,
            project_identifier,
            org_identifier,
            extra_params,
        )?;

        match self.api.get(&url).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_transport_failure() => Err(e),
            Err(e) => {
                debug!(url = %url, error = %e, "entity lookup did not succeed; treating as absent");
                Ok(false)
            }
        }
    }
}
