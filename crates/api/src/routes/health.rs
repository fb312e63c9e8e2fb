//! Root-level liveness endpoint.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// Always 200 so load balancers can tell a degraded service from a dead one.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match shelfmark_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    Json(HealthResponse::new(db_healthy))
}

/// Mount the health route at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
