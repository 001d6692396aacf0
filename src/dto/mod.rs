pub mod bookmarks;
pub mod main;
