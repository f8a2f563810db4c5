pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod server;
pub mod session;
