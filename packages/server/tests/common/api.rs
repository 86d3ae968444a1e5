//! In-process HTTP client driving the router with `oneshot`.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use eventos_core::domains::auth::JwtService;
use eventos_core::kernel::test_dependencies::TEST_JWT_SECRET;

pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct ApiClient {
    router: Router,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    /// Send a bearer token signed with the test secret
    pub fn as_user(mut self, email: &str, is_admin: bool) -> Self {
        let jwt = JwtService::new(TEST_JWT_SECRET, "eventos360".to_string());
        self.token = Some(jwt.create_token(email, is_admin).unwrap());
        self
    }

    pub fn as_admin(self) -> Self {
        self.as_user("admin@eventos.mx", true)
    }

    pub async fn send(&self, request: Request<Body>) -> ApiResponse {
        let mut request = request;
        if let Some(token) = &self.token {
            request.headers_mut().insert(
                header::AUTHORIZATION,
                format!("Bearer {}", token).parse().unwrap(),
            );
        }

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();

        ApiResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(&self, method: Method, uri: &str) -> ApiResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> ApiResponse {
        self.request(Method::GET, uri).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> ApiResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> ApiResponse {
        self.json(Method::POST, uri, body).await
    }
}
