//! HTTP API server

pub mod paths;
pub mod routes;
pub mod server;

pub use server::*;
