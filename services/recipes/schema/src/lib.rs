//! sea-orm entities for the recipes service.

pub mod comments;
pub mod favorites;
pub mod ratings;
pub mod recipes;
pub mod users;
