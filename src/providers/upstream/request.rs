use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::providers::openai::ChatRequest;

/// Persona block the upstream expects on every call. Not configurable per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub avatar: Option<String>,
    pub name: String,
    pub nickname: String,
    pub age: u32,
    pub gender: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            avatar: None,
            name: String::new(),
            nickname: String::new(),
            age: 0,
            gender: "other".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRequest {
    pub task: String,
    pub model: String,
    pub messages: Value,
    pub image_url: Option<String>,
    pub settings: UpstreamSettings,
}

// messages 原样透传，不做校验
pub fn adapt_openai_request(request: ChatRequest, default_model: &str) -> UpstreamRequest {
    let model = request
        .model
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default_model.to_string());

    UpstreamRequest {
        task: "chat".to_string(),
        model,
        messages: request.messages,
        image_url: None,
        settings: UpstreamSettings::default(),
    }
}
