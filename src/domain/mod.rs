pub mod bookmark;
pub mod types;
