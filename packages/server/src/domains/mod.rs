// Business domains
pub mod admin;
pub mod assistant;
pub mod auth;
pub mod blog;
pub mod checkout;
pub mod favorites;
pub mod plans;
pub mod providers;
