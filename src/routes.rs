//! Route registration
//! Assembles the API router and applies the middleware stack

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{handlers, middleware::AppState};

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public endpoints (no credentials)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // Credential endpoints (no token yet)
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login));

    // Everything below requires a verified bearer token. The auth layer
    // attaches the decoded identity before any handler runs; admin-only
    // handlers additionally gate on the role through AdminContext.
    let protected_routes = Router::new()
        .route("/api/v1/auth/profile", get(handlers::auth::profile))
        .route(
            "/api/v1/exams",
            get(handlers::exam::list_exams).post(handlers::exam::create_exam),
        )
        .route(
            "/api/v1/exams/{id}",
            get(handlers::exam::get_exam)
                .put(handlers::exam::update_exam)
                .delete(handlers::exam::delete_exam),
        )
        .route("/api/v1/exams/{id}/results", get(handlers::exam::exam_results))
        .route(
            "/api/v1/attempts",
            get(handlers::attempt::list_my_attempts).post(handlers::attempt::submit_attempt),
        )
        .route(
            "/api/v1/admin/enrollments",
            get(handlers::admin::list_enrollments),
        )
        .layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .with_state(state)
}
