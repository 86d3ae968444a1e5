//! Favorites domain - providers saved by anonymous visitor sessions

pub mod activities;
pub mod models;

pub use models::Favorite;
