use axum::routing::{get, post};
use axum::Router;
use snip_core::ShortCode;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_url_handler, health_handler, redirect_handler, stats_handler};
use crate::state::AppState;

/// Top-level path segments that a six character code could otherwise shadow.
const RESERVED_SEGMENTS: &[&str] = &["health"];

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/urls", post(create_url_handler))
            .route("/urls/{code}/stats", get(stats_handler))
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Codes the allocator must skip so every issued code stays routable.
    pub fn reserved_codes() -> Vec<ShortCode> {
        RESERVED_SEGMENTS
            .iter()
            .filter_map(|segment| ShortCode::new(segment).ok())
            .collect()
    }
}
