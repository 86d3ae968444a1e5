//! Plans domain - subscription tiers for providers

pub mod data;
pub mod models;

use anyhow::Result;

use crate::kernel::ServerDeps;

pub use data::PlanData;
pub use models::{BillingPeriod, Plan};

/// Active plans in display order
pub async fn list_plans(deps: &ServerDeps) -> Result<Vec<PlanData>> {
    let plans = Plan::find_active(&deps.db_pool).await?;
    Ok(plans.into_iter().map(PlanData::from).collect())
}
