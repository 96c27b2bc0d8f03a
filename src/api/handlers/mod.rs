//! Request handlers.

mod catalog_handler;

pub use catalog_handler::catalog_routes;
