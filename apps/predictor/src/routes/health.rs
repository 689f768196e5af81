use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Returns this service's version plus the prediction service's own health,
/// or `null` for `upstream` when it cannot be reached.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let upstream = match state.predictor.health().await {
        Ok(health) => Some(health),
        Err(e) => {
            warn!("Prediction service health check failed: {e}");
            None
        }
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "salary-predictor",
        "upstream_base": state.config.api_base,
        "upstream": upstream
    }))
}
