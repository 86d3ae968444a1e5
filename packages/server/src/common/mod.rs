// Common types and utilities shared across the application

pub mod entity_ids;
pub mod error;
pub mod id;
pub mod pagination;
pub mod utils;

pub use entity_ids::*;
pub use error::{ApiError, ApiResult};
pub use id::Id;
pub use pagination::*;
