use crate::config::UpstreamConfig;
use crate::providers::openai::{ChatCompletionResponse, ChatRequest, CompletionMeta};

mod client;
mod request;
mod response;

pub use client::{REQUEST_ID_HEADER, is_event_stream};
pub use request::{UpstreamRequest, UpstreamSettings};
pub use response::{DATA_PREFIX, DONE_TOKEN, UpstreamEvent, parse_event_line};

pub struct UpstreamProvider;

impl UpstreamProvider {
    pub fn convert_openai_to_upstream(request: ChatRequest, default_model: &str) -> UpstreamRequest {
        request::adapt_openai_request(request, default_model)
    }

    pub fn aggregate_event_body(body: &str, meta: &CompletionMeta) -> ChatCompletionResponse {
        response::aggregate_event_body(body, meta)
    }

    pub async fn chat_completions(
        client: &reqwest::Client,
        cfg: &UpstreamConfig,
        request_id: &str,
        request: &UpstreamRequest,
    ) -> crate::error::Result<reqwest::Response> {
        client::chat_completions(client, cfg, request_id, request).await
    }
}
