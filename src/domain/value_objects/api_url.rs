use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;
use std::fmt;
use url::Url;

/// A fully built request URL for the remote API.
///
/// Query parameters keep the order they were given in, so two builds with the
/// same inputs always produce the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl {
    url: Url,
}

impl ApiUrl {
    /// Appends `segments` to `base` and then `params` in order.
    ///
    /// Each segment is escaped as a single path segment, so identifiers
    /// containing `/`, `?` or `#` cannot change which resource is addressed.
    pub fn build(base: &str, segments: &[&str], params: &[(&str, &str)]) -> GitOpsResult<Self> {
        let mut url = Url::parse(base).map_err(|e| {
            GitOpsError::config_error_with_source(format!("Invalid API URL: {}", base), e)
        })?;

        if let Some(bad) = segments
            .iter()
            .find(|segment| segment.is_empty() || **segment == "." || **segment == "..")
        {
            return Err(GitOpsError::validation_error(
                "path segment",
                "identifier cannot be used as a URL path segment",
                Some(bad.to_string()),
            ));
        }

        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| GitOpsError::config_error(format!("API URL cannot take a path: {}", base)))?
                .pop_if_empty()
                .extend(segments);
        }

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Value of the first query parameter named `name`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.query_param(name).is_some()
    }

    /// Query parameter names in order.
    pub fn param_names(&self) -> Vec<String> {
        self.url
            .query_pairs()
            .map(|(key, _)| key.into_owned())
            .collect()
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
