use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::response::ResponseBody;
use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;
use crate::domain::entities::client_context::ClientContext;
use crate::domain::value_objects::api_url::ApiUrl;

/// Transport seam for the remote REST API.
///
/// Every call either returns the decoded JSON body of a 2xx response
/// (`Value::Null` when the body is empty) or an error. Non-2xx responses map
/// to `GitOpsError::ApiError`; requests that never got a response map to
/// `GitOpsError::NetworkError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitOpsApi: Send + Sync {
    async fn get(&self, url: &ApiUrl) -> GitOpsResult<Value>;

    async fn post_json(&self, url: &ApiUrl, body: &Value) -> GitOpsResult<Value>;

    async fn put_json(&self, url: &ApiUrl, body: &Value) -> GitOpsResult<Value>;
}

/// `reqwest` implementation with bearer authentication.
pub struct HttpApiClient {
    client: Client,
    auth_token: String,
}

impl HttpApiClient {
    pub fn new(context: &ClientContext) -> GitOpsResult<Self> {
        let client = Client::builder()
            .timeout(context.timeout())
            .user_agent(concat!("gitops-apply/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GitOpsError::config_error_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            auth_token: context.api_key().to_string(),
        })
    }

    async fn send(&self, method: Method, url: &ApiUrl, body: Option<&Value>) -> GitOpsResult<Value> {
        debug!(method = %method, url = %url, "sending request");

        let mut request = self
            .client
            .request(method.clone(), url.as_url().clone())
            .bearer_auth(&self.auth_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "request failed without a response");
            GitOpsError::network_error_with_source(
                format!("{} request failed", method),
                Some(url.to_string()),
                e,
            )
        })?;

        let status = response.status();
        debug!(method = %method, url = %url, status = status.as_u16(), "received response");

        let text = match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(method = %method, url = %url, error = %e, "response body could not be read");
                None
            }
        };

        Self::decode(status, url, text.as_deref())
    }

    /// `text` is `None` when the body could not be read after the status arrived.
    fn decode(status: StatusCode, url: &ApiUrl, text: Option<&str>) -> GitOpsResult<Value> {
        if !status.is_success() {
            let body = text.and_then(|t| serde_json::from_str::<ResponseBody>(t).ok());
            return Err(GitOpsError::api_error(status.as_u16(), url.as_str(), body));
        }

        let text = text.ok_or_else(|| {
            GitOpsError::network_error(
                format!("response body was lost after status {}", status.as_u16()),
                Some(url.to_string()),
            )
        })?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
    }
}

#[async_trait]
impl GitOpsApi for HttpApiClient {
    async fn get(&self, url: &ApiUrl) -> GitOpsResult<Value> {
        self.send(Method::GET, url, None).await
    }

    async fn post_json(&self, url: &ApiUrl, body: &Value) -> GitOpsResult<Value> {
        self.send(Method::POST, url, Some(body)).await
    }

    async fn put_json(&self, url: &ApiUrl, body: &Value) -> GitOpsResult<Value> {
        self.send(Method::PUT, url, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> ApiUrl {
        ApiUrl::build("https://example.io", &["applications"], &[]).unwrap()
    }

    #[test]
    fn test_decode_success_body() {
        let value = HttpApiClient::decode(StatusCode::OK, &url(), Some(r#"{"name":"app1"}"#)).unwrap();
        assert_eq!(value["name"], "app1");
    }

    #[test]
    fn test_decode_empty_success_body() {
        let value = HttpApiClient::decode(StatusCode::NO_CONTENT, &url(), Some("")).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_decode_failure_with_envelope() {
        let err = HttpApiClient::decode(
            StatusCode::BAD_REQUEST,
            &url(),
            Some(r#"{"status":"ERROR","code":"INVALID_REQUEST","message":"bad spec"}"#),
        )
        .unwrap_err();

        match err {
            GitOpsError::ApiError { status, response, .. } => {
                assert_eq!(status, 400);
                assert_eq!(response.unwrap().message.as_deref(), Some("bad spec"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_failure_without_json() {
        let err = HttpApiClient::decode(StatusCode::BAD_GATEWAY, &url(), Some("<html>")).unwrap_err();
        assert!(matches!(err, GitOpsError::ApiError { status: 502, response: None, .. }));
        assert!(!err.is_transport_failure());
    }

    #[test]
    fn test_unreadable_failure_body_keeps_status() {
        let err = HttpApiClient::decode(StatusCode::NOT_FOUND, &url(), None).unwrap_err();
        assert!(matches!(err, GitOpsError::ApiError { status: 404, response: None, .. }));
        assert!(!err.is_transport_failure());
    }

    #[test]
    fn test_unreadable_success_body_is_transport_failure() {
        let err = HttpApiClient::decode(StatusCode::OK, &url(), None).unwrap_err();
        assert!(err.is_transport_failure());
    }
}
