use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::PlanId;

/// Subscription tier on the pricing page (read-only reference data)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub stripe_price_id: Option<String>,
    pub active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Billing period encoded in the plan name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// "mensual" means monthly and "anual" yearly, anywhere in the name
    pub fn from_plan_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("mensual") {
            Some(BillingPeriod::Monthly)
        } else if name.contains("anual") {
            Some(BillingPeriod::Yearly)
        } else {
            None
        }
    }
}

impl Plan {
    pub fn billing_period(&self) -> Option<BillingPeriod> {
        BillingPeriod::from_plan_name(&self.name)
    }

    /// Bullet lines: the description split on periods
    pub fn features(&self) -> Vec<String> {
        split_features(self.description.as_deref().unwrap_or_default())
    }

    pub async fn find_active(pool: &PgPool) -> Result<Vec<Self>> {
        let plans = sqlx::query_as::<_, Self>(
            "SELECT * FROM provider_plans WHERE active = true ORDER BY sort_order, price",
        )
        .fetch_all(pool)
        .await?;
        Ok(plans)
    }
}

pub fn split_features(description: &str) -> Vec<String> {
    description
        .split('.')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
