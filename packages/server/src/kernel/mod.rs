//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod payments;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

pub use ai::OpenAIAssistant;
pub use deps::{ServerDeps, SiteSettings};
pub use payments::StripeAdapter;
pub use storage::HttpObjectStorage;
pub use test_dependencies::TestDependencies;
pub use traits::*;
