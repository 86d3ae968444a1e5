use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::ProviderId;
use crate::domains::providers::Provider;

/// Provider saved by an anonymous visitor session
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Favorite {
    pub session_id: String,
    pub provider_id: ProviderId,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    /// Idempotent: saving twice keeps the first row
    pub async fn add(session_id: &str, provider_id: ProviderId, pool: &PgPool) -> Result<Self> {
        let favorite = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO favorites (session_id, provider_id)
            VALUES ($1, $2)
            ON CONFLICT (session_id, provider_id)
                DO UPDATE SET session_id = EXCLUDED.session_id
            RETURNING *
            "#,
        )
        .bind(session_id)
        .bind(provider_id)
        .fetch_one(pool)
        .await?;
        Ok(favorite)
    }

    /// Returns whether a row was removed
    pub async fn remove(session_id: &str, provider_id: ProviderId, pool: &PgPool) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM favorites WHERE session_id = $1 AND provider_id = $2")
                .bind(session_id)
                .bind(provider_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active providers saved by a session, most recently saved first
    pub async fn find_providers(session_id: &str, pool: &PgPool) -> Result<Vec<Provider>> {
        let providers = sqlx::query_as::<_, Provider>(
            r#"
            SELECT p.* FROM favorites f
            JOIN providers p ON p.id = f.provider_id
            WHERE f.session_id = $1 AND p.active = true
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(pool)
        .await?;
        Ok(providers)
    }
}
