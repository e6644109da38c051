//! HTTP API serving product search and chat retrieval

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use server::build_app;
pub use server::serve_api;
