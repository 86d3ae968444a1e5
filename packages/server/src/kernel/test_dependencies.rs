// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use super::{
    BaseAI, BaseObjectStorage, BasePaymentService, CheckoutParams, CheckoutSession,
    PaymentCustomer, ServerDeps, SiteSettings,
};
use crate::domains::auth::JwtService;

// =============================================================================
// Mock AI
// =============================================================================

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Every call fails as if the upstream were unreachable
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// (system, user) pairs sent to the AI
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a user prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|(_, user)| user.contains(text))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        if self.fail {
            anyhow::bail!("mock AI unavailable");
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            Ok(responses.remove(0))
        } else {
            Ok("Mock AI response".to_string())
        }
    }
}

// =============================================================================
// Mock Payment Service
// =============================================================================

/// One recorded call against the payment provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCall {
    FindCustomer(String),
    CreateCustomer { email: String, idempotency_key: String },
    CreateCheckout(CheckoutParams),
}

pub struct MockPaymentService {
    customers: Arc<Mutex<Vec<PaymentCustomer>>>,
    calls: Arc<Mutex<Vec<PaymentCall>>>,
    fail_checkout: bool,
}

impl MockPaymentService {
    pub fn new() -> Self {
        Self {
            customers: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_checkout: false,
        }
    }

    /// Seed an existing customer
    pub fn with_customer(self, id: &str, email: &str) -> Self {
        self.customers.lock().unwrap().push(PaymentCustomer {
            id: id.to_string(),
            email: Some(email.to_string()),
        });
        self
    }

    /// Checkout session creation is rejected upstream
    pub fn failing_checkout(mut self) -> Self {
        self.fail_checkout = true;
        self
    }

    pub fn calls(&self) -> Vec<PaymentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn created_customers(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, PaymentCall::CreateCustomer { .. }))
            .count()
    }
}

impl Default for MockPaymentService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePaymentService for MockPaymentService {
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<PaymentCustomer>> {
        self.calls
            .lock()
            .unwrap()
            .push(PaymentCall::FindCustomer(email.to_string()));

        // Yield so concurrent callers can interleave between lookup and create
        tokio::task::yield_now().await;

        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create_customer(
        &self,
        email: &str,
        idempotency_key: &str,
    ) -> Result<PaymentCustomer> {
        self.calls.lock().unwrap().push(PaymentCall::CreateCustomer {
            email: email.to_string(),
            idempotency_key: idempotency_key.to_string(),
        });

        let mut customers = self.customers.lock().unwrap();
        let customer = PaymentCustomer {
            id: format!("cus_mock_{}", customers.len() + 1),
            email: Some(email.to_string()),
        };
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn create_subscription_checkout(
        &self,
        params: CheckoutParams,
    ) -> Result<CheckoutSession> {
        self.calls
            .lock()
            .unwrap()
            .push(PaymentCall::CreateCheckout(params.clone()));

        if self.fail_checkout {
            anyhow::bail!("No such price: '{}'", params.price_id);
        }

        Ok(CheckoutSession {
            id: "cs_test_mock".to_string(),
            url: Some("https://checkout.example.com/c/cs_test_mock".to_string()),
        })
    }
}

// =============================================================================
// Mock Object Storage
// =============================================================================

/// One recorded upload: (bucket, key, content type, size)
pub type UploadCall = (String, String, String, usize);

pub struct MockObjectStorage {
    uploads: Arc<Mutex<Vec<UploadCall>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseObjectStorage for MockObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            content_type.to_string(),
            bytes.len(),
        ));
        Ok(format!("https://files.test/{}/{}", bucket, key))
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

pub const TEST_JWT_SECRET: &str = "test_secret";

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Option<Arc<MockAI>>,
    pub payments: Option<Arc<MockPaymentService>>,
    pub storage: Option<Arc<MockObjectStorage>>,
    pub settings: SiteSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Some(Arc::new(MockAI::new())),
            payments: Some(Arc::new(MockPaymentService::new())),
            storage: Some(Arc::new(MockObjectStorage::new())),
            settings: SiteSettings {
                site_url: "https://eventos.test".to_string(),
                checkout_success_url: "https://eventos.test/registro/exito".to_string(),
                checkout_cancel_url: "https://eventos.test/planes".to_string(),
                ..SiteSettings::default()
            },
        }
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(Arc::new(ai));
        self
    }

    pub fn without_ai(mut self) -> Self {
        self.ai = None;
        self
    }

    pub fn mock_payments(mut self, payments: MockPaymentService) -> Self {
        self.payments = Some(Arc::new(payments));
        self
    }

    pub fn mock_storage(mut self, storage: MockObjectStorage) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Configure admin credentials (password given in clear text)
    pub fn with_admin(mut self, email: &str, password: &str) -> Self {
        self.settings.admin_email = Some(email.to_string());
        self.settings.admin_password_sha256 = Some(crate::common::utils::sha256_hex(password));
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_server_deps(self, db_pool: PgPool) -> ServerDeps {
        let jwt_service = Arc::new(JwtService::new(TEST_JWT_SECRET, "eventos360".to_string()));
        let mut deps = ServerDeps::new(db_pool, jwt_service, self.settings);
        if let Some(ai) = self.ai {
            deps = deps.with_ai(ai);
        }
        if let Some(payments) = self.payments {
            deps = deps.with_payments(payments);
        }
        if let Some(storage) = self.storage {
            deps = deps.with_storage(storage);
        }
        deps
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
