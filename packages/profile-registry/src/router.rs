//! HTTP router setup.

use crate::config::Config;
use crate::handlers;
use crate::middleware::inject_request_id;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/profile", post(handlers::create_profile))
        .route(
            "/profile/{id}",
            get(handlers::get_profile).patch(handlers::patch_profile),
        )
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(inject_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

/// Preflight answers for every path. Any origin in dev mode, otherwise the
/// allow-origin header is sent only when the request's origin matches the
/// configured one.
fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(PREFLIGHT_MAX_AGE);

    if config.dev_mode {
        return base.allow_origin(Any);
    }
    match config
        .cors_origin
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok())
    {
        Some(origin) => base.allow_origin(AllowOrigin::list([origin])),
        None => {
            warn!("No cors_origin configured; cross-origin requests will be refused");
            base
        }
    }
}

fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(detail = %detail, "Handler panicked");
    (StatusCode::BAD_REQUEST, detail).into_response()
}
