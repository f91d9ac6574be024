//! SMS analysis endpoints.
//!
//! POST /check-sms - full pipeline, returns a verdict label
//! POST /llm       - raw risk scorer reply for the first URL in the text

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::detection::{analyze_message_url, check_message, Verdict};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SmsRequest {
    #[serde(default)]
    pub sms_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse<T> {
    pub result: T,
}

/// Classify an SMS. Always answers with one of the verdict labels.
pub async fn check_sms_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<SmsRequest>,
) -> Json<AnalysisResponse<Verdict>> {
    info!(chars = request.sms_text.chars().count(), "Checking SMS");

    let verdict = check_message(&request.sms_text, &state.server_deps).await;

    Json(AnalysisResponse { result: verdict })
}

/// Score the first URL of an SMS without the reputation gate.
///
/// [`ApiError::NoUrlFound`] (422) when the text has no URL.
pub async fn llm_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<SmsRequest>,
) -> Result<Json<AnalysisResponse<String>>, ApiError> {
    let reply = analyze_message_url(&request.sms_text, &state.server_deps)
        .await
        .ok_or(ApiError::NoUrlFound)?;

    Ok(Json(AnalysisResponse { result: reply }))
}
