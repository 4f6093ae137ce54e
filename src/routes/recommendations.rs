use axum::{body::Bytes, extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        Activity, Recommendation, RecommendationRequest, Season, CLIMATE_CODES, COST_LEVELS,
        DISTANCE_BUCKETS,
    },
    routes::AppState,
    services::recommendations,
};

/// Describes the request body accepted by `POST /recommend`
pub async fn schema() -> Json<Value> {
    Json(json!({
        "hint": "POST JSON to this endpoint.",
        "schema": {
            "user_location": {
                "city": "",
                "country": "",
                "latitude": 0,
                "longitude": 0,
            },
            "VACATION_TIME": Season::labels(),
            "CLIMATE": CLIMATE_CODES,
            "BUDGET": COST_LEVELS,
            "PREFERENCES": Activity::keys(),
            "COUNTRY": "domestic|international",
            "DISTANCE": DISTANCE_BUCKETS,
        }
    }))
}

/// Handler for the recommendation endpoint.
///
/// The body is parsed as JSON whatever its content type.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<Vec<Recommendation>>> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected unparsable request body");
        AppError::InvalidJson
    })?;
    let request = RecommendationRequest::from_json(payload)?;

    tracing::info!(
        request_id = %request_id,
        catalog_size = state.catalog.len(),
        "Processing recommendation request"
    );

    match recommendations::recommend(&state.catalog, &request) {
        Ok(results) => {
            tracing::info!(
                request_id = %request_id,
                results = results.len(),
                "Recommendation completed"
            );
            Ok(Json(results))
        }
        Err(e @ AppError::Validation { .. }) => {
            tracing::warn!(request_id = %request_id, error = %e, "Invalid recommendation request");
            Err(e)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Recommendation failed");
            Err(e)
        }
    }
}
