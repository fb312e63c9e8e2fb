//! The complete HTTP service: routes, middleware and path normalization.
//!
//! `main.rs` and the integration tests both call [`build_app_router`], so
//! tests exercise exactly what production serves.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request id, generated when the client sends none.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// The served application.
///
/// Clients address collections as `/api/books/` and `/api/books`
/// interchangeably, so a trailing slash is trimmed before routing. That has
/// to happen outside the [`Router`]: a layer added with `Router::layer` runs
/// after the route is already chosen.
pub type App = NormalizePath<Router>;

/// Build the application with every middleware layer and bound state.
///
/// Layers, outermost first:
///
/// 1. Trailing-slash trimming
/// 2. CORS
/// 3. Request id assignment
/// 4. Request/response tracing
/// 5. Request id echoed on the response
/// 6. Request timeout
/// 7. Panic recovery
pub fn build_app_router(state: AppState, config: &ServerConfig) -> App {
    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes());

    let router = with_middleware(router, config).with_state(state);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn with_middleware(router: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// CORS for the configured browser origins. Token auth travels in the
/// `Authorization` header.
///
/// An unparsable origin is a startup misconfiguration and panics.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
