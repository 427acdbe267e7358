use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Forward a product descriptor to the eco-score service and return its answer unchanged
#[utoipa::path(
    post,
    path = "/api/get-eco-score",
    tag = "eco-score",
    request_body(content = serde_json::Value, description = "Product descriptor, passed through as-is"),
    responses(
        (status = 200, description = "Eco-score payload from the scoring service", body = serde_json::Value),
        (status = 400, description = "Request body is not valid JSON", body = ErrorResponse),
        (status = 502, description = "Scoring service unreachable or returned an error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, product))]
pub async fn get_eco_score(
    State(state): State<Arc<AppState>>,
    ValidatedJson(product): ValidatedJson<Value>,
) -> Result<Json<Value>, HttpAppError> {
    let score = state.eco_score.get_eco_score(&product).await?;
    Ok(Json(score))
}
