use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::classifier::Classify;
use crate::constants::{
    HYPOTHESIS_TEMPLATE, LABEL_FAKE, LABEL_TRUTHFUL, VERIDICT_STATUS_HEADER, VERIDICT_STATUS_OK,
};
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::policy;

/// Body of `POST /predict`.
#[derive(Debug, Deserialize, Serialize)]
pub struct PredictRequest {
    pub text: String,
}

#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn predict_handler<C>(
    State(state): State<HandlerState<C>>,
    Json(request): Json<PredictRequest>,
) -> Result<Response, GatewayError>
where
    C: Classify + 'static,
{
    // Validation happens before the classifier is ever touched.
    if request.text.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "text input cannot be empty".to_string(),
        ));
    }

    let classifier = state
        .classifier
        .as_ref()
        .ok_or(GatewayError::ModelUnavailable)?;

    debug!("Running zero-shot classification");

    let result = classifier
        .classify(
            &request.text,
            &[LABEL_TRUTHFUL, LABEL_FAKE],
            HYPOTHESIS_TEMPLATE,
        )
        .map_err(|e| {
            error!(error = %e, "Classification failed");
            GatewayError::InferenceFailed(e)
        })?;

    let prediction = policy::decide(&result).map_err(|e| {
        error!(error = %e, "Decision policy rejected classifier output");
        GatewayError::Policy(e)
    })?;

    info!(
        truth_probability = prediction.truth_probability,
        label = %prediction.label,
        "Prediction complete"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        VERIDICT_STATUS_HEADER,
        HeaderValue::from_static(VERIDICT_STATUS_OK),
    );

    Ok((headers, Json(prediction)).into_response())
}
