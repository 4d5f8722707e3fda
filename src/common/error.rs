use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::http::response::ResponseBody;

#[derive(Error, Debug)]
pub enum GitOpsError {
    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Manifest error: {message}")]
    ManifestError {
        message: String,
        file_path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Required manifest field missing or not a string: {path}")]
    MissingField { path: String },

    #[error("Network operation failed: {message}")]
    NetworkError {
        message: String,
        url: Option<String>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Remote API returned {status} for {url}")]
    ApiError {
        status: u16,
        url: String,
        response: Option<ResponseBody>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GitOpsError {
    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn manifest_error(message: impl Into<String>, file_path: Option<PathBuf>) -> Self {
        Self::ManifestError {
            message: message.into(),
            file_path,
            source: None,
        }
    }

    pub fn manifest_error_with_source(
        message: impl Into<String>,
        file_path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ManifestError {
            message: message.into(),
            file_path,
            source: Some(Box::new(source)),
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    pub fn network_error(message: impl Into<String>, url: Option<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
            url,
            source: None,
        }
    }

    pub fn network_error_with_source(
        message: impl Into<String>,
        url: Option<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::NetworkError {
            message: message.into(),
            url,
            source: Some(source),
        }
    }

    pub fn api_error(status: u16, url: impl Into<String>, response: Option<ResponseBody>) -> Self {
        Self::ApiError {
            status,
            url: url.into(),
            response,
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True when the request never produced an HTTP response (refused, timed out, DNS).
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }

    /// The decoded remote response body, if the failure carried one.
    pub fn response_body(&self) -> Option<&ResponseBody> {
        match self {
            Self::ApiError { response, .. } => response.as_ref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GitOpsError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_json::Error> for GitOpsError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}

impl From<reqwest::Error> for GitOpsError {
    fn from(error: reqwest::Error) -> Self {
        let url = error.url().map(|u| u.to_string());
        Self::network_error_with_source("Network request failed", url, error)
    }
}
