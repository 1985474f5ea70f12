//! Helpdesk domain core.
//!
//! Pure domain logic shared by the backend client, the mail crate, and the
//! API server: entity shapes, role rules, the ticket filter predicate, the
//! assign/reassign decision, dashboard metric shaping and chart geometry.
//! Nothing in here performs I/O.

pub mod assignment;
pub mod chart;
pub mod comment;
pub mod error;
pub mod export;
pub mod filter;
pub mod form_options;
pub mod markup;
pub mod metrics;
pub mod navigation;
pub mod roles;
pub mod submission;
pub mod ticket;
pub mod types;
pub mod user;
