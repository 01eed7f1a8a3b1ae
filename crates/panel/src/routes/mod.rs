//! HTTP route handlers for the panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Orders screen
//! POST /orders/{id}/picker/{field} - Open a status picker
//! POST /orders/{id}/status         - Apply a status change
//! POST /picker/close               - Close the open picker
//! POST /filters                    - Apply one filter chip
//! POST /filters/reset              - Clear all filters
//! GET  /events                     - Live event stream (SSE)
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (probes the store)
//! ```

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

pub mod events;
pub mod orders;

/// Build the panel router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list::index))
        .route("/orders/{id}/picker/{field}", post(orders::actions::open_picker))
        .route("/orders/{id}/status", post(orders::actions::update_status))
        .route("/picker/close", post(orders::actions::close_picker))
        .route("/filters", post(orders::actions::set_filter))
        .route("/filters/reset", post(orders::actions::reset_filters))
        .route("/events", get(events::stream))
        .route("/health", get(health))
        .route("/health/ready", get(ready))
}

/// Liveness check.
async fn health() -> &'static str {
    "OK"
}

/// Readiness check: the panel is ready when the store answers a trivial
/// query with the configured token.
async fn ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    match state.sanity().ping().await {
        Ok(()) => Ok("OK"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
