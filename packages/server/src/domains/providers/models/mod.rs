pub mod provider;
pub mod service;

pub use provider::{CategoryCount, Provider, ProviderFlag, ProviderProfile};
pub use service::{NewService, ProviderService};
