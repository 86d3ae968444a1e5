use anyhow::Result;
use tracing::info;

use crate::common::{ApiError, BlogPostId};
use crate::domains::blog::models::{BlogPost, BlogPostInput};
use crate::kernel::ServerDeps;

fn validate(mut input: BlogPostInput) -> Result<BlogPostInput, ApiError> {
    input.title = input.title.trim().to_string();
    if input.title.is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }
    if input.content.trim().is_empty() {
        return Err(ApiError::bad_request("content is required"));
    }
    input.author = input
        .author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());
    input.image_url = input
        .image_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    Ok(input)
}

pub async fn list_published_posts(deps: &ServerDeps) -> Result<Vec<BlogPost>> {
    BlogPost::find_published(&deps.db_pool).await
}

/// Public read; drafts do not exist for visitors
pub async fn get_published_post(id: BlogPostId, deps: &ServerDeps) -> Result<BlogPost> {
    BlogPost::find_by_id(id, &deps.db_pool)
        .await?
        .filter(|p| p.published)
        .ok_or_else(|| ApiError::not_found("post not found").into())
}

pub async fn list_all_posts(deps: &ServerDeps) -> Result<Vec<BlogPost>> {
    BlogPost::find_all(&deps.db_pool).await
}

pub async fn create_post(input: BlogPostInput, deps: &ServerDeps) -> Result<BlogPost> {
    let input = validate(input)?;
    let post = BlogPost::create(&input, &deps.db_pool).await?;
    info!(post_id = %post.id, published = post.published, "Blog post created");
    Ok(post)
}

pub async fn update_post(id: BlogPostId, input: BlogPostInput, deps: &ServerDeps) -> Result<BlogPost> {
    let input = validate(input)?;
    let post = BlogPost::update(id, &input, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;
    info!(post_id = %id, published = post.published, "Blog post updated");
    Ok(post)
}

pub async fn delete_post(id: BlogPostId, deps: &ServerDeps) -> Result<()> {
    if !BlogPost::delete(id, &deps.db_pool).await? {
        return Err(ApiError::not_found("post not found").into());
    }
    info!(post_id = %id, "Blog post deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, content: &str) -> BlogPostInput {
        BlogPostInput {
            title: title.into(),
            content: content.into(),
            author: Some("  ".into()),
            image_url: None,
            published: true,
        }
    }

    #[test]
    fn test_validate_requires_title_and_content() {
        assert!(validate(input(" ", "cuerpo")).is_err());
        assert!(validate(input("Título", "\n")).is_err());
    }

    #[test]
    fn test_validate_drops_blank_author() {
        let post = validate(input(" Bodas 2026 ", "Tendencias")).unwrap();
        assert_eq!(post.title, "Bodas 2026");
        assert!(post.author.is_none());
    }
}
