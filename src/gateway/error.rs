use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::constants::VERIDICT_STATUS_HEADER;
use crate::policy::PolicyError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client sent an unusable request (e.g. empty text). Reported as 400.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The classifier never initialized; fatal to all predictions until the
    /// process restarts.
    #[error("model not loaded")]
    ModelUnavailable,

    /// The model call failed for this request. The process keeps serving.
    #[error("prediction failed: {0}")]
    InferenceFailed(#[from] ClassifierError),

    /// The classifier returned a result the decision policy cannot use.
    #[error("prediction failed: {0}")]
    Policy(#[from] PolicyError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, veridict_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::ModelUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "model_unavailable")
            }
            GatewayError::InferenceFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "inference_error")
            }
            GatewayError::Policy(_) => (StatusCode::INTERNAL_SERVER_ERROR, "policy_error"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            VERIDICT_STATUS_HEADER,
            HeaderValue::from_str(veridict_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
