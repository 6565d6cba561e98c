use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::infra::app_state::AppState;

/// Liveness plus a catalog probe: the root folder must resolve.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match state.library().ports().catalog.get_root_folder().await {
        Ok(root) => {
            health_status["checks"]["catalog"] = json!({
                "status": "healthy",
                "root_id": root.id,
            });
            Ok(Json(health_status))
        }
        Err(err) => {
            warn!(error = %err, "catalog health probe failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["catalog"] = json!({
                "status": "unhealthy",
                "error": err.to_string(),
            });
            Err((StatusCode::SERVICE_UNAVAILABLE, Json(health_status)))
        }
    }
}
