pub mod handlers;
pub(crate) mod request_logging;
pub mod streaming;
pub(crate) mod util;

use crate::config::Settings;
use crate::error::Result as AppResult;
use crate::http_client::client_for_upstream;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Settings,
    pub client: reqwest::Client,
}

pub fn create_app(config: Settings) -> AppResult<Router> {
    let client = client_for_upstream(&config.upstream)?;

    if config.auth.api_key.is_none() {
        tracing::warn!("auth.api_key is not set; the proxy accepts unauthenticated requests");
    }
    tracing::info!(
        upstream = %config.upstream.url,
        default_model = %config.upstream.default_model,
        "Upstream configured"
    );

    let app_state = AppState { config, client };

    let mut app = handlers::routes().with_state(Arc::new(app_state));

    // CORS：API 使用 Bearer 认证，不依赖 Cookie，放开来源
    use axum::http::{Method, header};
    use tower_http::cors::{Any, CorsLayer};
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(Any);
    app = app.layer(cors).layer(TraceLayer::new_for_http());

    Ok(app)
}
