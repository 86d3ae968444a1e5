pub mod provider;

pub use provider::{
    ProviderListing, RegisterProviderInput, RegistrationData, ServiceData, ServiceInput,
    UpdateProviderInput,
};
