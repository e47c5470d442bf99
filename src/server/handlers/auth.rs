use axum::http::HeaderMap;

use crate::error::GatewayError;
use crate::server::AppState;
use crate::server::util::{bearer_token, mask_key};

// 校验客户端 Bearer key：
// - 未配置 auth.api_key 时直接放行
// - 否则必须与配置完全一致
pub fn ensure_client(headers: &HeaderMap, app_state: &AppState) -> Result<(), GatewayError> {
    let Some(expected) = app_state.config.auth.api_key.as_deref() else {
        return Ok(());
    };
    let Some(provided) = bearer_token(headers) else {
        return Err(GatewayError::Unauthorized("missing bearer token".into()));
    };
    if provided != expected {
        tracing::warn!(key = %mask_key(&provided), "rejected request with invalid api key");
        return Err(GatewayError::Unauthorized("invalid api key".into()));
    }
    Ok(())
}
