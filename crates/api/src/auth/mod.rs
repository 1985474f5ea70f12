//! Authentication primitives.
//!
//! - [`jwt`] -- validation of externally issued HS256 access tokens.

pub mod jwt;
