pub mod plan;

pub use plan::{split_features, BillingPeriod, Plan};
