use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::PlanId;
use crate::domains::plans::models::{BillingPeriod, Plan};

/// Plan as rendered on the pricing page
#[derive(Debug, Clone, Serialize)]
pub struct PlanData {
    pub id: PlanId,
    pub name: String,
    pub price: Decimal,
    pub billing_period: Option<BillingPeriod>,
    pub features: Vec<String>,
    /// Payment-provider price id sent back in the checkout request
    pub price_id: Option<String>,
}

impl From<Plan> for PlanData {
    fn from(plan: Plan) -> Self {
        Self {
            billing_period: plan.billing_period(),
            features: plan.features(),
            id: plan.id,
            name: plan.name,
            price: plan.price,
            price_id: plan.stripe_price_id,
        }
    }
}
