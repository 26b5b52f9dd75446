//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{feature_new, healthz, live, not_found, ready, root, status, AppState};
use crate::probe::Probe;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probe endpoints
        .route(Probe::Live.path(), get(live))
        .route(Probe::Ready.path(), get(ready))
        .route(Probe::Health.path(), get(healthz))
        // Rollout demo
        .route(Probe::FeatureNew.path(), get(feature_new))
        .route(Probe::Root.path(), get(root))
        .route(Probe::Status.path(), get(status))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
