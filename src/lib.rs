//! commtrack - track company communications
//!
//! Library interface for the commtrack server: authentication with
//! role-gated routes, company and communication-method management, and the
//! notification engine that decides what is overdue or due today.

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod tracking;

pub use config::Config;
pub use error::Error;
