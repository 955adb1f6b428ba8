//! Ambient plumbing shared by Pantry services: configuration loading,
//! tracing, the common HTTP error, health probes and request middleware.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
