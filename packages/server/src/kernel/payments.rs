// Payment provider adapter (Stripe)

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use stripe_client::{StripeClient, SubscriptionCheckout};

use super::{BasePaymentService, CheckoutParams, CheckoutSession, PaymentCustomer};

/// Wrapper around StripeClient that implements BasePaymentService trait
pub struct StripeAdapter(pub Arc<StripeClient>);

impl StripeAdapter {
    pub fn new(client: Arc<StripeClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BasePaymentService for StripeAdapter {
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<PaymentCustomer>> {
        let customer = self
            .0
            .find_customer_by_email(email)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(customer.map(|c| PaymentCustomer {
            id: c.id,
            email: c.email,
        }))
    }

    async fn create_customer(
        &self,
        email: &str,
        idempotency_key: &str,
    ) -> Result<PaymentCustomer> {
        let customer = self
            .0
            .create_customer(email, idempotency_key)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(PaymentCustomer {
            id: customer.id,
            email: customer.email,
        })
    }

    async fn create_subscription_checkout(
        &self,
        params: CheckoutParams,
    ) -> Result<CheckoutSession> {
        let checkout = SubscriptionCheckout {
            customer_id: params.customer_id,
            price_id: params.price_id,
            success_url: params.success_url,
            cancel_url: params.cancel_url,
            metadata: params.metadata,
        };

        let session = self
            .0
            .create_checkout_session(&checkout)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }
}
