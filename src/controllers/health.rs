use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::provider::ProviderIdentity;
use crate::infrastructure::db::{check_connection, DbPool};

#[derive(Clone)]
pub struct HealthState {
    pub pool: Option<Arc<DbPool>>,
    pub providers: Vec<ProviderIdentity>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<HealthState>) -> impl IntoResponse {
    let Some(pool) = &state.pool else {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "database": "not_configured",
                "providers": state.providers
            })),
        );
    };

    match check_connection(pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "database": "connected",
                "providers": state.providers
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "database": "disconnected",
                    "providers": state.providers
                })),
            )
        }
    }
}
