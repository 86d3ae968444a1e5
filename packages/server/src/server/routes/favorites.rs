use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use crate::common::{ApiResult, ProviderId};
use crate::domains::favorites::activities::{add_favorite, list_favorites, remove_favorite};
use crate::domains::favorites::Favorite;
use crate::domains::providers::ProviderListing;
use crate::server::app::AxumAppState;

pub async fn list_favorites_handler(
    Extension(state): Extension<AxumAppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<Vec<ProviderListing>>> {
    Ok(Json(list_favorites(&session_id, &state.server_deps).await?))
}

pub async fn add_favorite_handler(
    Extension(state): Extension<AxumAppState>,
    Path((session_id, provider_id)): Path<(String, ProviderId)>,
) -> ApiResult<(StatusCode, Json<Favorite>)> {
    let favorite = add_favorite(&session_id, provider_id, &state.server_deps).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn remove_favorite_handler(
    Extension(state): Extension<AxumAppState>,
    Path((session_id, provider_id)): Path<(String, ProviderId)>,
) -> ApiResult<StatusCode> {
    remove_favorite(&session_id, provider_id, &state.server_deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
