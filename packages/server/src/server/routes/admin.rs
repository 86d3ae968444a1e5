//! Back-office endpoints. Everything except login requires an admin session.

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{ApiError, ApiResult, BlogPostId, Page, PageArgs, ProviderId};
use crate::domains::admin::activities::{
    export_feedback_csv, export_filename, feedback_stats, review_feedback, table_counts,
    table_sample, FeedbackStats, TableCount, TableSample,
};
use crate::domains::assistant::{FeedbackFilter, FeedbackRecord};
use crate::domains::auth::activities::{admin_login, LoginInput, LoginOutput};
use crate::domains::blog::activities::{
    create_post, delete_post, list_all_posts, update_post, upload_blog_image,
};
use crate::domains::blog::{BlogPost, BlogPostInput};
use crate::domains::providers::activities::{
    approve_provider, deactivate_provider, list_all_providers, set_provider_flag,
};
use crate::domains::providers::{Provider, ProviderFlag, ProviderListing};
use crate::server::app::AxumAppState;
use crate::server::middleware::AdminUser;

pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<LoginInput>,
) -> ApiResult<Json<LoginOutput>> {
    Ok(Json(admin_login(input, &state.server_deps).await?))
}

// =============================================================================
// Blog
// =============================================================================

pub async fn list_posts_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(list_all_posts(&state.server_deps).await?))
}

pub async fn create_post_handler(
    AdminUser(admin): AdminUser,
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<BlogPostInput>,
) -> ApiResult<(StatusCode, Json<BlogPost>)> {
    let post = create_post(input, &state.server_deps).await?;
    info!(admin = %admin.email, post_id = %post.id, "Blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<BlogPostId>,
    Json(input): Json<BlogPostInput>,
) -> ApiResult<Json<BlogPost>> {
    Ok(Json(update_post(id, input, &state.server_deps).await?))
}

pub async fn delete_post_handler(
    AdminUser(admin): AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<BlogPostId>,
) -> ApiResult<StatusCode> {
    delete_post(id, &state.server_deps).await?;
    info!(admin = %admin.email, post_id = %id, "Blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

/// Multipart upload; the image is read from the `file` field
pub async fn upload_image_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadedImage>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let url =
            upload_blog_image(&filename, &content_type, bytes.to_vec(), &state.server_deps).await?;
        return Ok(Json(UploadedImage { url }));
    }

    Err(ApiError::bad_request("missing file field"))
}

// =============================================================================
// Providers
// =============================================================================

pub async fn list_providers_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<ProviderListing>>> {
    Ok(Json(list_all_providers(&state.server_deps).await?))
}

pub async fn approve_provider_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProviderId>,
) -> ApiResult<Json<Provider>> {
    Ok(Json(approve_provider(id, &state.server_deps).await?))
}

pub async fn deactivate_provider_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProviderId>,
) -> ApiResult<Json<Provider>> {
    Ok(Json(deactivate_provider(id, &state.server_deps).await?))
}

#[derive(Debug, Deserialize)]
pub struct FlagInput {
    pub value: bool,
}

pub async fn premium_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProviderId>,
    Json(input): Json<FlagInput>,
) -> ApiResult<Json<Provider>> {
    let provider =
        set_provider_flag(id, ProviderFlag::Premium, input.value, &state.server_deps).await?;
    Ok(Json(provider))
}

pub async fn featured_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProviderId>,
    Json(input): Json<FlagInput>,
) -> ApiResult<Json<Provider>> {
    let provider =
        set_provider_flag(id, ProviderFlag::Featured, input.value, &state.server_deps).await?;
    Ok(Json(provider))
}

// =============================================================================
// Diagnostics and feedback review
// =============================================================================

pub async fn table_counts_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<TableCount>>> {
    Ok(Json(table_counts(&state.server_deps).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct SampleQuery {
    pub limit: Option<i64>,
}

pub async fn table_sample_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Path(table): Path<String>,
    Query(query): Query<SampleQuery>,
) -> ApiResult<Json<TableSample>> {
    Ok(Json(
        table_sample(&table, query.limit, &state.server_deps).await?,
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    #[serde(default)]
    pub filter: FeedbackFilter,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

pub async fn feedback_page_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<FeedbackQuery>,
) -> ApiResult<Json<Page<FeedbackRecord>>> {
    let args = PageArgs {
        page: query.page,
        size: query.size,
    };
    Ok(Json(
        review_feedback(query.filter, args, &state.server_deps).await?,
    ))
}

pub async fn feedback_stats_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<FeedbackStats>> {
    Ok(Json(feedback_stats(&state.server_deps).await?))
}

pub async fn feedback_export_handler(
    _admin: AdminUser,
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<FeedbackQuery>,
) -> ApiResult<Response> {
    let csv = export_feedback_csv(query.filter, &state.server_deps).await?;
    let filename = export_filename(query.filter, chrono::Utc::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response())
}
