//! Domain types shared across Pantry services.
//!
//! This crate contains only pure types with no framework dependencies.
//!
//! The rating aggregation and favorite-set logic live here so they can be
//! exercised without any store behind them.

pub mod favorite;
pub mod feed;
pub mod id;
pub mod pagination;
pub mod rating;
pub mod recipe;
pub mod user;
