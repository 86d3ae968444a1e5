use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use crate::common::{ApiError, ApiResult};
use crate::domains::checkout::activities::create_checkout_session;
use crate::domains::checkout::{CheckoutRequest, CheckoutResponse};
use crate::server::app::AxumAppState;

/// Unreadable bodies are 400s like any other invalid checkout request
pub async fn checkout_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<Json<CheckoutResponse>> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(Json(
        create_checkout_session(request, &state.server_deps).await?,
    ))
}
