//! HTTP gateway layer (Axum) for the prediction API.
//!
//! This module is primarily used by the `veridict` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{PredictRequest, predict_handler};
pub use state::HandlerState;

use crate::classifier::Classify;
use crate::constants::{
    ALLOWED_ORIGINS, MODEL_NAME, VERIDICT_STATUS_HEADER, VERIDICT_STATUS_HEALTHY,
    VERIDICT_STATUS_OK,
};

pub fn create_router_with_state<C>(state: HandlerState<C>) -> Router
where
    C: Classify + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// CORS for the frontend dev servers, mirroring the original deployment
/// (credentialed, so origins must be listed explicitly).
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|origin| HeaderValue::from_static(origin))
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[derive(serde::Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub model: &'static str,
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub mode: &'static str,
}

#[tracing::instrument]
pub async fn root_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        VERIDICT_STATUS_HEADER,
        HeaderValue::from_static(VERIDICT_STATUS_OK),
    );

    (
        StatusCode::OK,
        headers,
        Json(ServiceInfo {
            message: "Fake News Detection API",
            status: "running",
            model: MODEL_NAME,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn health_handler<C>(State(state): State<HandlerState<C>>) -> Response
where
    C: Classify + 'static,
{
    let model_loaded = state.classifier.is_some();

    let mut headers = HeaderMap::new();
    headers.insert(
        VERIDICT_STATUS_HEADER,
        HeaderValue::from_static(VERIDICT_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse {
            status: "healthy",
            model_loaded,
            mode: state.classifier_mode(),
        }),
    )
        .into_response()
}
