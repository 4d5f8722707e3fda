use serde::{Deserialize, Serialize};

/// Envelope returned by the remote API, decoded from failure responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub resource: Option<serde_json::Value>,

    #[serde(default, alias = "responseMessages")]
    pub messages: Vec<ResponseMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseBody {
    /// Best human-readable explanation carried by the body.
    pub fn summary(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return Some(message.to_string());
        }
        let joined = self.messages_display();
        if joined.is_empty() {
            self.code.clone()
        } else {
            Some(joined)
        }
    }

    pub fn resource_display(&self) -> String {
        match &self.resource {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn messages_display(&self) -> String {
        self.messages
            .iter()
            .filter_map(|m| m.message.as_deref())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
