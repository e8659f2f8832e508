// handlers/public/status.rs - GET / and GET /health handlers

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Terminal Staffing API",
            "version": version,
            "site": state.config.site.domain,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "terminal_staffing_delete": "/api/mgt/terminal_staffing/delete (session)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return Err(ApiError::service_unavailable("Database not configured"));
    };

    match database.health_check().await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "data": {
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            }
        }))),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
