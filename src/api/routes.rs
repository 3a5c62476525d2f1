use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{make_span_with_request_id, request_id_middleware, require_session};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/health", get(handlers::health_check))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/signup", get(handlers::signup_form).post(handlers::signup))
        .route("/logout", post(handlers::logout))
        .merge(protected_routes(state.clone()))
        .fallback(handlers::not_found)
        .layer(
            // Request id first, so the trace span sees it
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Pages that need a signed-in session
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/browse", get(handlers::browse))
        .route("/browse/:category", get(handlers::browse_category))
        .route("/watch/:media_type/:id", get(handlers::watch))
        .route("/search", get(handlers::search))
        .route("/api/v1/home", get(handlers::home_catalog))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
