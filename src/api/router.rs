//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`; prediction and profile
//! routes require a bearer session token, auth and schema routes are
//! public. CORS is permissive — the browser frontend is served from
//! a different origin.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>`.
pub fn api_router(ctx: ApiContext) -> Router {
    // Protected routes — require a valid session token
    let protected = Router::new()
        .route("/prediction", post(endpoints::prediction::predict))
        .route("/prediction/history", get(endpoints::prediction::history))
        .route(
            "/user/profile",
            get(endpoints::profile::get).put(endpoints::profile::update),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // Public routes
    let public = Router::new()
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/prediction/schema", get(endpoints::prediction::schema))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected)
        .nest("/api", public)
        .layer(CorsLayer::permissive())
}
