//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by every
//! domain activity. External services are trait objects so tests can swap in
//! the mocks from `test_dependencies`. Optional integrations are `None` when
//! their configuration is absent; callers answer "not configured" instead of
//! failing at startup.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::{Config, SocialLinks};
use crate::domains::auth::JwtService;
use crate::domains::checkout::CustomerLocks;
use crate::kernel::{BaseAI, BaseObjectStorage, BasePaymentService};

// =============================================================================
// SiteSettings
// =============================================================================

/// Static settings read once at startup
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    pub site_url: String,
    pub social_links: SocialLinks,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
    pub admin_email: Option<String>,
    /// Lower-case hex SHA-256 of the admin password
    pub admin_password_sha256: Option<String>,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            site_url: config.site_url.clone(),
            social_links: config.social_links.clone(),
            checkout_success_url: config.checkout_success_url.clone(),
            checkout_cancel_url: config.checkout_cancel_url.clone(),
            admin_email: config.admin_email.clone(),
            admin_password_sha256: config.admin_password_sha256.clone(),
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Language model behind the assistant (None when OPENAI_API_KEY is unset)
    pub ai: Option<Arc<dyn BaseAI>>,
    /// Payment provider for checkout (None when STRIPE_SECRET_KEY is unset)
    pub payments: Option<Arc<dyn BasePaymentService>>,
    /// Object storage for blog images (None when STORAGE_URL is unset)
    pub storage: Option<Arc<dyn BaseObjectStorage>>,
    /// JWT service for admin sessions
    pub jwt_service: Arc<JwtService>,
    /// Serializes customer lookup-then-create per email
    pub customer_locks: Arc<CustomerLocks>,
    pub settings: Arc<SiteSettings>,
}

impl ServerDeps {
    /// Create ServerDeps with no optional integrations
    pub fn new(db_pool: PgPool, jwt_service: Arc<JwtService>, settings: SiteSettings) -> Self {
        Self {
            db_pool,
            ai: None,
            payments: None,
            storage: None,
            jwt_service,
            customer_locks: Arc::new(CustomerLocks::default()),
            settings: Arc::new(settings),
        }
    }

    pub fn with_ai(mut self, ai: Arc<dyn BaseAI>) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_payments(mut self, payments: Arc<dyn BasePaymentService>) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn BaseObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }
}
