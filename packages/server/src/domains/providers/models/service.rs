use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;

use crate::common::{ProviderId, ServiceId};

/// Offering of a provider; never read outside its provider
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProviderService {
    pub id: ServiceId,
    pub provider_id: ProviderId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Index in the submitted list
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Validated service fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl ProviderService {
    pub async fn find_for_provider(provider_id: ProviderId, pool: &PgPool) -> Result<Vec<Self>> {
        let services = sqlx::query_as::<_, Self>(
            "SELECT * FROM provider_services WHERE provider_id = $1 ORDER BY position, id",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;
        Ok(services)
    }

    /// Services of many providers in one round trip, grouped by provider
    pub async fn find_for_providers(
        provider_ids: &[ProviderId],
        pool: &PgPool,
    ) -> Result<HashMap<ProviderId, Vec<Self>>> {
        if provider_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let services = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM provider_services
            WHERE provider_id = ANY($1)
            ORDER BY provider_id, position, id
            "#,
        )
        .bind(provider_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<ProviderId, Vec<Self>> = HashMap::new();
        for service in services {
            grouped.entry(service.provider_id).or_default().push(service);
        }
        Ok(grouped)
    }

    /// Replace the full service list of a provider inside an open transaction
    pub async fn replace_for_provider(
        provider_id: ProviderId,
        services: &[NewService],
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Self>> {
        sqlx::query("DELETE FROM provider_services WHERE provider_id = $1")
            .bind(provider_id)
            .execute(&mut **tx)
            .await?;

        let mut inserted = Vec::with_capacity(services.len());
        for (position, service) in services.iter().enumerate() {
            let row = sqlx::query_as::<_, Self>(
                r#"
                INSERT INTO provider_services (id, provider_id, name, description, price, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(ServiceId::new())
            .bind(provider_id)
            .bind(&service.name)
            .bind(&service.description)
            .bind(service.price)
            .bind(i32::try_from(position)?)
            .fetch_one(&mut **tx)
            .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }
}
