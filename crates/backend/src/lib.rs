//! Client for the external helpdesk REST backend.
//!
//! The backend owns tickets, users and comments. This crate wraps its HTTP
//! API behind the [`HelpdeskBackend`] trait so the portal server can be
//! driven by the real [`RestBackend`] in production and by an in-memory
//! fake in tests.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{HelpdeskBackend, RestBackend};
pub use config::BackendConfig;
pub use error::BackendError;
