use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::BlogPostId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a post
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostInput {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl BlogPost {
    /// Published posts, newest first
    pub async fn find_published(pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Self>(
            "SELECT * FROM blog_posts WHERE published = true ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Every post including drafts, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Self>("SELECT * FROM blog_posts ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
        Ok(posts)
    }

    pub async fn find_by_id(id: BlogPostId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Self>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    pub async fn create(input: &BlogPostInput, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO blog_posts (id, title, content, author, image_url, published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(BlogPostId::new())
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.author)
        .bind(&input.image_url)
        .bind(input.published)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Last write wins; None when the post does not exist
    pub async fn update(id: BlogPostId, input: &BlogPostInput, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            UPDATE blog_posts SET
                title = $2,
                content = $3,
                author = $4,
                image_url = $5,
                published = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.author)
        .bind(&input.image_url)
        .bind(input.published)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// Returns whether a row was deleted
    pub async fn delete(id: BlogPostId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
