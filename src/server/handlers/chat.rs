use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use super::auth::ensure_client;
use crate::error::GatewayError;
use crate::providers::openai::{ChatRequest, CompletionMeta};
use crate::providers::upstream::{UpstreamProvider, is_event_stream};
use crate::server::AppState;
use crate::server::request_logging::log_chat_request;
use crate::server::streaming::{TailPolicy, relay_event_stream, sse_response};

/// Chat Completions 入口：
/// - 将 OpenAI 请求适配为上游格式并转发
/// - 客户端要求流式且上游返回 `text/event-stream` 时逐行转写为 OpenAI chunk
/// - 其余情况读取完整响应体并聚合为一次性 completion
pub async fn chat_completions(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    ensure_client(&headers, &app_state)?;
    // 手动解析：非法 JSON 按内部错误返回，而不是 axum 默认的 4xx
    let request: ChatRequest = serde_json::from_slice(&body)?;

    let start_time = Utc::now();
    let stream = request.is_stream();
    let upstream_cfg = &app_state.config.upstream;

    let upstream_req =
        UpstreamProvider::convert_openai_to_upstream(request, &upstream_cfg.default_model);
    let meta = CompletionMeta::new(upstream_req.model.clone());

    let response = match UpstreamProvider::chat_completions(
        &app_state.client,
        upstream_cfg,
        &meta.id,
        &upstream_req,
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            let msg = e.to_string();
            log_chat_request(&meta, stream, start_time, e.status_code().as_u16(), Some(&msg));
            return Err(e);
        }
    };
    let status_code = response.status().as_u16();

    if stream && is_event_stream(&response) {
        log_chat_request(&meta, stream, start_time, status_code, None);
        let tail = TailPolicy::from_flush_flag(upstream_cfg.flush_trailing_line);
        let frames = relay_event_stream(response.bytes_stream(), meta, tail);
        return Ok(sse_response(frames));
    }

    let body = response.text().await?;
    let completion = UpstreamProvider::aggregate_event_body(&body, &meta);
    log_chat_request(&meta, stream, start_time, status_code, None);
    Ok(Json(completion).into_response())
}
