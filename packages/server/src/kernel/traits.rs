// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to ask the model, which plan to sell and where blog images live are
// decided in the domain layers that call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseObjectStorage)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// AI Trait (Infrastructure - chat completion)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Answer `user` under the instructions in `system` (returns raw text)
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

// =============================================================================
// Payment Trait (Infrastructure - customers and subscription checkout)
// =============================================================================

/// Payment customer as far as checkout is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCustomer {
    pub id: String,
    pub email: Option<String>,
}

/// Everything needed to open a subscription checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutParams {
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(String, String)>,
}

/// Hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[async_trait]
pub trait BasePaymentService: Send + Sync {
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<PaymentCustomer>>;

    /// Create a customer; replays with the same key must not duplicate it
    async fn create_customer(&self, email: &str, idempotency_key: &str)
        -> Result<PaymentCustomer>;

    async fn create_subscription_checkout(&self, params: CheckoutParams)
        -> Result<CheckoutSession>;
}

// =============================================================================
// Object Storage Trait (Infrastructure - public buckets)
// =============================================================================

#[async_trait]
pub trait BaseObjectStorage: Send + Sync {
    /// Upload `bytes` under `bucket/key` and return the object's public URL
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String>;
}
