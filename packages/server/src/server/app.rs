//! Application setup and server configuration.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get, post, put},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domains::blog::activities::MAX_IMAGE_BYTES;
use crate::kernel::ServerDeps;
use crate::server::middleware::{jwt_auth_middleware, open_cors};
use crate::server::routes::{
    admin, assistant, blog, checkout, favorites, health_handler, public, robots_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

/// Turn a handler panic into a JSON 500 instead of a dropped connection
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal server error",
            "detail": detail,
        })),
    )
        .into_response()
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(AnyOrigin)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(public::EDIT_TOKEN_HEADER),
        ])
}

fn public_routes() -> Router {
    Router::new()
        .route("/api/categories", get(public::categories_handler))
        .route(
            "/api/categories/:category/providers",
            get(public::category_providers_handler),
        )
        .route("/api/providers", get(public::providers_handler))
        .route(
            "/api/providers/register",
            post(public::register_provider_handler),
        )
        .route(
            "/api/providers/:id",
            get(public::provider_handler).put(public::update_provider_handler),
        )
        .route("/api/plans", get(public::plans_handler))
        .route("/api/legal", get(public::legal_handler))
        .route("/api/site", get(public::site_handler))
        .route(
            "/api/favorites/:session_id",
            get(favorites::list_favorites_handler),
        )
        .route(
            "/api/favorites/:session_id/:provider_id",
            post(favorites::add_favorite_handler).delete(favorites::remove_favorite_handler),
        )
        .route("/api/blog", get(blog::list_posts_handler))
        .route("/api/blog/:id", get(blog::post_handler))
        .route("/api/assistant/ask", post(assistant::ask_handler))
        .route(
            "/api/assistant/feedback/:id",
            post(assistant::feedback_handler),
        )
        .route("/api/assistant/status", get(assistant::status_handler))
}

fn admin_routes() -> Router {
    Router::new()
        .route("/api/admin/login", post(admin::login_handler))
        .route(
            "/api/admin/blog",
            get(admin::list_posts_handler).post(admin::create_post_handler),
        )
        .route(
            "/api/admin/blog/:id",
            put(admin::update_post_handler).delete(admin::delete_post_handler),
        )
        .route(
            "/api/admin/blog/images",
            post(admin::upload_image_handler)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024)),
        )
        .route("/api/admin/providers", get(admin::list_providers_handler))
        .route(
            "/api/admin/providers/:id/approve",
            post(admin::approve_provider_handler),
        )
        .route(
            "/api/admin/providers/:id/deactivate",
            post(admin::deactivate_provider_handler),
        )
        .route(
            "/api/admin/providers/:id/premium",
            put(admin::premium_handler),
        )
        .route(
            "/api/admin/providers/:id/featured",
            put(admin::featured_handler),
        )
        .route("/api/admin/diagnostics", get(admin::table_counts_handler))
        .route(
            "/api/admin/diagnostics/:table",
            get(admin::table_sample_handler),
        )
        .route("/api/admin/feedback", get(admin::feedback_page_handler))
        .route(
            "/api/admin/feedback/stats",
            get(admin::feedback_stats_handler),
        )
        .route(
            "/api/admin/feedback/export",
            get(admin::feedback_export_handler),
        )
}

/// Checkout is called from any origin, so it sits outside the CORS allow-list
fn checkout_routes() -> Router {
    Router::new()
        .route(
            "/api/checkout",
            post(checkout::checkout_handler).options(|| async { StatusCode::OK }),
        )
        .layer(middleware::from_fn(open_cors))
}

/// Build the Axum application router
pub fn build_app(server_deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let jwt_service = server_deps.jwt_service.clone();

    let app_state = AxumAppState {
        db_pool: server_deps.db_pool.clone(),
        server_deps: Arc::new(server_deps),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/robots.txt", any(robots_handler))
        .merge(public_routes())
        .merge(admin_routes())
        .layer(cors_layer(allowed_origins))
        .merge(checkout_routes())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Degraded router used when required configuration is missing: every route
/// answers 503 and names the missing keys.
pub fn build_unconfigured_app(missing: Vec<String>) -> Router {
    let missing = Arc::new(missing);

    Router::new()
        .fallback(move || {
            let missing = missing.clone();
            async move {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "error": "not configured",
                        "missing": missing.as_slice(),
                    })),
                )
            }
        })
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_is_reported() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("owned boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
