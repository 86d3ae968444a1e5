//! Auth domain - admin back-office sessions
//!
//! Responsibilities:
//! - Checking the configured admin credentials
//! - Session/JWT token management

pub mod activities;
pub mod errors;
pub mod jwt;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService};
