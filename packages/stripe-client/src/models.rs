use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerList {
    pub data: Vec<Customer>,
}

/// Parameters for a subscription checkout session with a single price.
#[derive(Debug, Clone)]
pub struct SubscriptionCheckout {
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    /// Copied onto both the session and the resulting subscription.
    pub metadata: Vec<(String, String)>,
}

impl SubscriptionCheckout {
    /// Stripe's bracketed form encoding.
    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("mode".to_string(), "subscription".to_string()),
            ("customer".to_string(), self.customer_id.clone()),
            ("line_items[0][price]".to_string(), self.price_id.clone()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];
        for (key, value) in &self.metadata {
            fields.push((format!("metadata[{key}]"), value.clone()));
            fields.push((format!("subscription_data[metadata][{key}]"), value.clone()));
        }
        fields
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: Option<String>,
}
