//! HTTP API: upload a table, get KML or a map preview back

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
