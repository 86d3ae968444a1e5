//! Providers domain - the event-service directory

pub mod activities;
pub mod data;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use data::{ProviderListing, RegisterProviderInput, RegistrationData, ServiceData};
pub use models::{Provider, ProviderFlag, ProviderService};
pub use search::search;
