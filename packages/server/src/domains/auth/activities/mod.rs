//! Auth domain activities

pub mod login;

pub use login::{admin_login, LoginInput, LoginOutput};
