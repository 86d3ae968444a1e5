use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::ProviderId;

/// Listed business
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Provider {
    pub id: ProviderId,

    // Profile
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,

    // Contact
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,

    // Listing flags
    pub active: bool,
    pub premium: bool,
    pub featured: bool,

    /// SHA-256 of the self-edit token handed out at registration
    #[serde(skip_serializing)]
    pub edit_token_hash: String,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields written at registration and on self-edit
#[derive(Debug, Clone, Default)]
pub struct ProviderProfile {
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Admin-controlled listing flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFlag {
    Active,
    Premium,
    Featured,
}

impl ProviderFlag {
    fn column(self) -> &'static str {
        match self {
            ProviderFlag::Active => "active",
            ProviderFlag::Premium => "premium",
            ProviderFlag::Featured => "featured",
        }
    }
}

/// Distinct category with the number of active providers in it
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub providers: i64,
}

const PUBLIC_ORDER: &str = "ORDER BY featured DESC, premium DESC, name ASC";

impl Provider {
    pub async fn find_by_id(id: ProviderId, pool: &PgPool) -> Result<Option<Self>> {
        let provider = sqlx::query_as::<_, Self>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(provider)
    }

    /// Active providers in display order (featured, premium, then name)
    pub async fn find_active(pool: &PgPool) -> Result<Vec<Self>> {
        let providers = sqlx::query_as::<_, Self>(&format!(
            "SELECT * FROM providers WHERE active = true {PUBLIC_ORDER}"
        ))
        .fetch_all(pool)
        .await?;
        Ok(providers)
    }

    /// Active providers of one category, compared case-insensitively
    pub async fn find_active_by_category(category: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let providers = sqlx::query_as::<_, Self>(&format!(
            "SELECT * FROM providers WHERE active = true AND LOWER(category) = LOWER($1) {PUBLIC_ORDER}"
        ))
        .bind(category.trim())
        .fetch_all(pool)
        .await?;
        Ok(providers)
    }

    /// Featured active providers, used when nothing else matches
    pub async fn find_featured(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let providers = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM providers
            WHERE active = true AND featured = true
            ORDER BY premium DESC, name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(providers)
    }

    /// Every provider including inactive ones, newest first (admin)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let providers =
            sqlx::query_as::<_, Self>("SELECT * FROM providers ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;
        Ok(providers)
    }

    pub async fn categories(pool: &PgPool) -> Result<Vec<CategoryCount>> {
        let categories = sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS providers
            FROM providers
            WHERE active = true AND category IS NOT NULL AND category <> ''
            GROUP BY category
            ORDER BY category ASC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    /// Insert an inactive provider inside an open transaction
    pub async fn insert(
        id: ProviderId,
        profile: &ProviderProfile,
        edit_token_hash: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self> {
        let provider = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO providers (
                id, name, description, city, category, image_url,
                phone, email, website, active, edit_token_hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, false, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.description)
        .bind(&profile.city)
        .bind(&profile.category)
        .bind(&profile.image_url)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.website)
        .bind(edit_token_hash)
        .fetch_one(&mut **tx)
        .await?;
        Ok(provider)
    }

    /// Overwrite the profile fields inside an open transaction
    pub async fn update_profile(
        id: ProviderId,
        profile: &ProviderProfile,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self> {
        let provider = sqlx::query_as::<_, Self>(
            r#"
            UPDATE providers SET
                name = $2,
                description = $3,
                city = $4,
                category = $5,
                image_url = $6,
                phone = $7,
                email = $8,
                website = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.description)
        .bind(&profile.city)
        .bind(&profile.category)
        .bind(&profile.image_url)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.website)
        .fetch_one(&mut **tx)
        .await?;
        Ok(provider)
    }

    /// Set one listing flag; None when the provider does not exist
    pub async fn set_flag(
        id: ProviderId,
        flag: ProviderFlag,
        value: bool,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        // Column name comes from a closed enum, never from input
        let sql = format!(
            "UPDATE providers SET {} = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
            flag.column()
        );
        let provider = sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(value)
            .fetch_optional(pool)
            .await?;
        Ok(provider)
    }
}
