use anyhow::Result;
use tracing::info;

use crate::common::ApiError;
use crate::kernel::ServerDeps;

pub const BLOG_IMAGES_BUCKET: &str = "blog-images";

/// Largest accepted image
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Object key `blog/{unix_millis}_{filename}` with the filename reduced to
/// `[A-Za-z0-9._-]`
pub fn blog_image_key(filename: &str, unix_millis: i64) -> String {
    let sanitized: String = filename
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_start_matches('.');
    let name = if sanitized.is_empty() { "image" } else { sanitized };
    format!("blog/{}_{}", unix_millis, name)
}

/// Store an uploaded image and return its public URL
pub async fn upload_blog_image(
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
    deps: &ServerDeps,
) -> Result<String> {
    let storage = deps
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("image storage".into()))?;

    if bytes.is_empty() {
        return Err(ApiError::bad_request("empty file").into());
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::bad_request("image exceeds 5 MB").into());
    }
    if !content_type.starts_with("image/") {
        return Err(ApiError::bad_request("only images can be uploaded").into());
    }

    let key = blog_image_key(filename, chrono::Utc::now().timestamp_millis());
    let size = bytes.len();
    let url = storage
        .upload(BLOG_IMAGES_BUCKET, &key, content_type, bytes)
        .await?;

    info!(key = %key, size, "Blog image uploaded");
    Ok(url)
}
