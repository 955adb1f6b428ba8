pub mod comment;
pub mod favorite;
pub mod forum;
pub mod identity;
pub mod rating;
pub mod recipe;
