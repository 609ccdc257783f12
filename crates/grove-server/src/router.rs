use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// HTTP endpoint paths.
pub mod endpoints {
    pub const CREATE_INTENT: &str = "/planting-intents";
    pub const CONFIRM: &str = "/confirm";
    pub const PROOFS: &str = "/proofs";
    pub const HEALTH: &str = "/health";
}

/// Unrestricted CORS. Any `OPTIONS` request is answered here as a
/// preflight with an empty body, whatever the path.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the axum router with all Grove endpoints.
///
/// Known paths hit with the wrong method get the same 404 body as unknown
/// paths instead of axum's empty 405.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::CREATE_INTENT,
            post(handler::create_intent).fallback(handler::not_found),
        )
        .route(
            endpoints::CONFIRM,
            post(handler::confirm_intent).fallback(handler::not_found),
        )
        .route(
            endpoints::PROOFS,
            get(handler::get_proof).fallback(handler::not_found),
        )
        .route(
            endpoints::HEALTH,
            get(handler::health).fallback(handler::not_found),
        )
        .fallback(handler::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
