pub mod bookmark;
#[cfg(feature = "server")]
pub mod config;
