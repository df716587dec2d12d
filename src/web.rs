use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::models::PageData;
use crate::render::render;
use crate::service::{LookupForm, WeatherService};

/// Routes with their layers, ready to serve
pub fn router(service: Arc<WeatherService>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .with_state(service)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn show_form() -> Response {
    page_response(&PageData::default())
}

/// A body that does not decode as a form is treated like a form without
/// the `cep` field.
async fn submit_form(
    State(service): State<Arc<WeatherService>>,
    form: Result<Form<LookupForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!("Unreadable form body, using empty form: {}", rejection);
            LookupForm::default()
        }
    };
    let page = service.handle(&form).await;
    page_response(&page)
}

/// Application errors are part of the page, so this is 200 unless the
/// template itself fails.
fn page_response(page: &PageData) -> Response {
    match render(page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.user_message()).into_response()
        }
    }
}

pub async fn run(service: Arc<WeatherService>, config: &ServerConfig) -> Result<()> {
    let app = router(service, config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server stopped unexpectedly")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
