//! Flowerbed - plant a virtual flower and come back to see it.
//!
//! Library exports for the server binary and tests.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router with tracing attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
