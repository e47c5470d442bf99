use reqwest::header::{ACCEPT, CONTENT_TYPE, ORIGIN, REFERER};

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result};

use super::request::UpstreamRequest;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub async fn chat_completions(
    client: &reqwest::Client,
    cfg: &UpstreamConfig,
    request_id: &str,
    request: &UpstreamRequest,
) -> Result<reqwest::Response> {
    let mut builder = client
        .post(&cfg.url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "text/event-stream")
        .header(REQUEST_ID_HEADER, request_id)
        .json(request);

    if let Some(origin) = cfg.origin.as_deref() {
        builder = builder
            .header(ORIGIN, origin)
            .header(REFERER, format!("{}/", origin.trim_end_matches('/')));
    }

    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Upstream { status, body });
    }
    Ok(response)
}

pub fn is_event_stream(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/event-stream"))
}
