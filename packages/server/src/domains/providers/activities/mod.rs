//! Provider domain activities - business logic functions
//!
//! Activities are async functions called from HTTP handlers.
//! They do the work and return results directly.

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
