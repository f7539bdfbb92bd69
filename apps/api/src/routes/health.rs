use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Welcome message for the root path.
pub async fn welcome_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Verihire API!"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.1.0",
        "service": "verihire-api"
    }))
}
