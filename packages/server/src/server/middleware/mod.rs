// HTTP middleware
pub mod jwt_auth;
pub mod open_cors;

pub use jwt_auth::*;
pub use open_cors::*;
