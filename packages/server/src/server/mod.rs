// HTTP server setup (Axum)
pub mod app;
pub mod middleware;
pub mod routes;
pub mod shutdown;

pub use app::*;
pub use shutdown::wait_for_shutdown;
