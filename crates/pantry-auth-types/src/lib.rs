//! Session types shared across Pantry services.
//!
//! Sessions are issued by an external identity provider as HS256 JWTs.
//! This crate validates them and extracts the raw token from requests; it
//! does not look users up.

pub mod identity;
pub mod token;
