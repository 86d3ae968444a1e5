//! Subscription checkout for a registered provider.
//!
//! Required fields are checked before the payment provider is contacted.
//! The customer lookup-then-create runs under a per-email lock, and creation
//! carries an idempotency key derived from the email, so concurrent requests
//! for a new email end up with a single customer.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::common::utils::customer_idempotency_key;
use crate::common::ApiError;
use crate::kernel::{BasePaymentService, CheckoutParams, PaymentCustomer, ServerDeps};

/// Body of `POST /api/checkout`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub price_id: Option<String>,
    pub registration_id: Option<String>,
    pub user_email: Option<String>,
    pub plan_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: Option<String>,
}

/// Request with its required fields present.
///
/// `user_email` is trimmed and lower-cased; the lock, the customer lookup,
/// the create call and its idempotency key all see this one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout {
    pub price_id: String,
    pub user_email: String,
    pub registration_id: Option<String>,
    pub plan_name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CheckoutRequest {
    pub fn validate(self) -> Result<ValidCheckout, ApiError> {
        let price_id = non_blank(self.price_id)
            .ok_or_else(|| ApiError::bad_request("priceId is required"))?;
        let user_email = non_blank(self.user_email)
            .map(|email| email.to_lowercase())
            .ok_or_else(|| ApiError::bad_request("userEmail is required"))?;
        if !user_email.contains('@') {
            return Err(ApiError::bad_request("userEmail is not a valid email"));
        }

        Ok(ValidCheckout {
            price_id,
            user_email,
            registration_id: non_blank(self.registration_id),
            plan_name: non_blank(self.plan_name),
        })
    }
}

fn upstream(e: anyhow::Error) -> ApiError {
    error!(error = %e, "Payment provider call failed");
    ApiError::bad_request(e.to_string())
}

async fn find_or_create_customer(
    payments: &dyn BasePaymentService,
    email: &str,
    deps: &ServerDeps,
) -> Result<PaymentCustomer, ApiError> {
    let _guard = deps.customer_locks.lock(email).await;

    if let Some(customer) = payments
        .find_customer_by_email(email)
        .await
        .map_err(upstream)?
    {
        info!(customer_id = %customer.id, "Reusing payment customer");
        return Ok(customer);
    }

    let customer = payments
        .create_customer(email, &customer_idempotency_key(email))
        .await
        .map_err(upstream)?;
    info!(customer_id = %customer.id, "Created payment customer");
    Ok(customer)
}

pub async fn create_checkout_session(
    request: CheckoutRequest,
    deps: &ServerDeps,
) -> Result<CheckoutResponse> {
    let checkout = request.validate()?;

    let payments = deps
        .payments
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("checkout".into()))?;

    info!(
        price_id = %checkout.price_id,
        registration_id = ?checkout.registration_id,
        plan = ?checkout.plan_name,
        "Creating checkout session"
    );

    let customer =
        find_or_create_customer(payments.as_ref(), &checkout.user_email, deps).await?;

    let mut metadata = Vec::new();
    if let Some(registration_id) = &checkout.registration_id {
        metadata.push(("registration_id".to_string(), registration_id.clone()));
    }
    if let Some(plan_name) = &checkout.plan_name {
        metadata.push(("plan_name".to_string(), plan_name.clone()));
    }

    let session = payments
        .create_subscription_checkout(CheckoutParams {
            customer_id: customer.id,
            price_id: checkout.price_id,
            success_url: deps.settings.checkout_success_url.clone(),
            cancel_url: deps.settings.checkout_cancel_url.clone(),
            metadata,
        })
        .await
        .map_err(upstream)?;

    info!(session_id = %session.id, "Checkout session created");

    Ok(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockPaymentService, PaymentCall};
    use crate::kernel::TestDependencies;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    fn request(email: Option<&str>) -> CheckoutRequest {
        CheckoutRequest {
            price_id: Some("price_mensual".into()),
            registration_id: Some("reg-1".into()),
            user_email: email.map(str::to_string),
            plan_name: Some("Premium Mensual".into()),
        }
    }

    fn deps_with(payments: MockPaymentService) -> (ServerDeps, Arc<MockPaymentService>) {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let test_deps = TestDependencies::new().mock_payments(payments);
        let mock = test_deps.payments.clone().unwrap();
        (test_deps.into_server_deps(pool), mock)
    }

    #[tokio::test]
    async fn test_missing_email_makes_no_payment_calls() {
        let (deps, payments) = deps_with(MockPaymentService::new());

        let err = create_checkout_session(request(None), &deps)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::BadRequest(_))
        ));
        assert_eq!(payments.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_price_rejected() {
        let mut req = request(Some("ana@example.com"));
        req.price_id = Some("  ".into());
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "priceId is required");
    }

    #[tokio::test]
    async fn test_reuses_existing_customer() {
        let (deps, payments) =
            deps_with(MockPaymentService::new().with_customer("cus_1", "ana@example.com"));

        let response = create_checkout_session(request(Some("ana@example.com")), &deps)
            .await
            .unwrap();

        assert_eq!(response.session_id, "cs_test_mock");
        assert_eq!(payments.created_customers(), 0);

        let checkout = payments
            .calls()
            .into_iter()
            .find_map(|c| match c {
                PaymentCall::CreateCheckout(params) => Some(params),
                _ => None,
            })
            .unwrap();
        assert_eq!(checkout.customer_id, "cus_1");
        assert_eq!(checkout.success_url, "https://eventos.test/registro/exito");
        assert!(checkout
            .metadata
            .contains(&("registration_id".to_string(), "reg-1".to_string())));
        assert!(checkout
            .metadata
            .contains(&("plan_name".to_string(), "Premium Mensual".to_string())));
    }

    #[tokio::test]
    async fn test_creates_customer_with_idempotency_key() {
        let (deps, payments) = deps_with(MockPaymentService::new());

        create_checkout_session(request(Some("nueva@example.com")), &deps)
            .await
            .unwrap();

        assert!(payments.calls().contains(&PaymentCall::CreateCustomer {
            email: "nueva@example.com".into(),
            idempotency_key: customer_idempotency_key("nueva@example.com"),
        }));
    }

    #[test]
    fn test_email_is_normalized() {
        let checkout = request(Some("  Ana@Example.COM ")).validate().unwrap();
        assert_eq!(checkout.user_email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_mixed_case_email_reuses_customer() {
        let (deps, payments) = deps_with(MockPaymentService::new());

        create_checkout_session(request(Some("Ana@Example.com")), &deps)
            .await
            .unwrap();
        create_checkout_session(request(Some("ana@example.com")), &deps)
            .await
            .unwrap();

        assert_eq!(payments.created_customers(), 1);
        assert!(payments.calls().contains(&PaymentCall::CreateCustomer {
            email: "ana@example.com".into(),
            idempotency_key: customer_idempotency_key("ana@example.com"),
        }));
        assert!(!payments
            .calls()
            .contains(&PaymentCall::FindCustomer("Ana@Example.com".into())));
    }

    #[tokio::test]
    async fn test_concurrent_requests_create_one_customer() {
        let (deps, payments) = deps_with(MockPaymentService::new());

        let (a, b) = tokio::join!(
            create_checkout_session(request(Some("doble@example.com")), &deps),
            create_checkout_session(request(Some("doble@example.com")), &deps),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(payments.created_customers(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_request() {
        let (deps, _) = deps_with(MockPaymentService::new().failing_checkout());

        let err = create_checkout_session(request(Some("ana@example.com")), &deps)
            .await
            .unwrap_err();

        match err.downcast_ref::<ApiError>() {
            Some(ApiError::BadRequest(message)) => assert!(message.contains("price_mensual")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_payments() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let mut test_deps = TestDependencies::new();
        test_deps.payments = None;
        let deps = test_deps.into_server_deps(pool);

        let err = create_checkout_session(request(Some("ana@example.com")), &deps)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NotConfigured(_))
        ));
    }
}
