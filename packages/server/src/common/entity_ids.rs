//! Typed ID definitions for the directory entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for listed businesses.
pub struct Provider;

/// Marker type for services offered by a provider.
pub struct ProviderService;

/// Marker type for subscription plans.
pub struct Plan;

/// Marker type for blog posts.
pub struct BlogPost;

/// Marker type for logged assistant interactions.
pub struct Feedback;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Doubles as the registration id threaded through checkout metadata.
pub type ProviderId = Id<Provider>;

pub type ServiceId = Id<ProviderService>;

pub type PlanId = Id<Plan>;

pub type BlogPostId = Id<BlogPost>;

pub type FeedbackId = Id<Feedback>;
