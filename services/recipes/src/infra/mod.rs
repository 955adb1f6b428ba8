pub mod blob;
pub mod db;
pub mod feed;
pub mod forum;
