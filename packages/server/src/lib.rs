// Eventos 360 - API Core
//
// Backend for the event-service provider directory: public browsing and
// search, provider registration and plan checkout, the AI assistant and the
// admin back office.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
