use axum::{
    extract::Extension,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::server::app::AxumAppState;

pub fn robots_body(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin/\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        site_url.trim_end_matches('/')
    )
}

/// GET only; every other method is 405
pub async fn robots_handler(method: Method, Extension(state): Extension<AxumAppState>) -> Response {
    if method != Method::GET {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET")],
            "Method not allowed",
        )
            .into_response();
    }

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        robots_body(&state.server_deps.settings.site_url),
    )
        .into_response()
}
