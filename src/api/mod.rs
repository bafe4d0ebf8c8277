//! API Routes for Flowerbed
//!
//! This module combines all routes into a single router.

pub mod flowers;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the complete router.
///
/// Route structure:
/// - /plant/ - Plant or return to a flower (cookie-aware)
/// - /f/:flower_id/ - Flower page (public)
/// - /health, /health/ready, /health/live - Health checks (public)
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .merge(flowers::routes())
}
