//! Stripe REST client: customer lookup/creation and subscription checkout.

pub mod models;

use reqwest::{Client, Response};
use thiserror::Error;
use tracing::warn;

pub use crate::models::{CheckoutSession, Customer, SubscriptionCheckout};
use crate::models::{CustomerList, ErrorBody};

const DEFAULT_BASE_URL: &str = "https://api.stripe.com/v1";

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Stripe error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, StripeError>;

#[derive(Debug, Clone)]
pub struct StripeClient {
    http: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// First customer registered with `email`, if any.
    pub async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let response = self
            .http
            .get(format!("{}/customers", self.base_url))
            .bearer_auth(&self.secret_key)
            .query(&[("email", email), ("limit", "1")])
            .send()
            .await
            .map_err(|e| StripeError::Network(e.to_string()))?;

        let list: CustomerList = parse(response).await?;
        Ok(list.data.into_iter().next())
    }

    /// Create a customer. Replays with the same `idempotency_key` return the
    /// customer created by the first request.
    pub async fn create_customer(&self, email: &str, idempotency_key: &str) -> Result<Customer> {
        let response = self
            .http
            .post(format!("{}/customers", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", idempotency_key)
            .form(&[("email", email)])
            .send()
            .await
            .map_err(|e| StripeError::Network(e.to_string()))?;

        parse(response).await
    }

    pub async fn create_checkout_session(
        &self,
        checkout: &SubscriptionCheckout,
    ) -> Result<CheckoutSession> {
        let response = self
            .http
            .post(format!("{}/checkout/sessions", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&checkout.form_fields())
            .send()
            .await
            .map_err(|e| StripeError::Network(e.to_string()))?;

        parse(response).await
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or(body);
        warn!(status = %status, error = %message, "Stripe returned an error");
        return Err(StripeError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| StripeError::Parse(e.to_string()))
}
