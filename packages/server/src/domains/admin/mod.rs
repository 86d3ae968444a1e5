//! Admin domain - back-office diagnostics and feedback review
//!
//! Blog editing and provider approval live in their own domains; this one
//! holds what only the back office reads.

pub mod activities;
pub mod models;

pub use models::DiagnosticTable;
