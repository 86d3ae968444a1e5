use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{ApiResult, BlogPostId};
use crate::domains::blog::activities::{get_published_post, list_published_posts};
use crate::domains::blog::BlogPost;
use crate::server::app::AxumAppState;

pub async fn list_posts_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(list_published_posts(&state.server_deps).await?))
}

pub async fn post_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<BlogPostId>,
) -> ApiResult<Json<BlogPost>> {
    Ok(Json(get_published_post(id, &state.server_deps).await?))
}
