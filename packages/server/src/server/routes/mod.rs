// HTTP routes
pub mod admin;
pub mod assistant;
pub mod blog;
pub mod checkout;
pub mod favorites;
pub mod health;
pub mod public;
pub mod robots;

pub use health::*;
pub use robots::*;
