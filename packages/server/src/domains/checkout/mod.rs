pub mod activities;
pub mod locks;

pub use activities::{CheckoutRequest, CheckoutResponse};
pub use locks::CustomerLocks;
