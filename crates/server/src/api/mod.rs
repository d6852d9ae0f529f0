//! HTTP API server implementation

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::ApiServer;
