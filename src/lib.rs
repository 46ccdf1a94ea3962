pub mod config;
pub mod database;
pub mod error;
pub mod loader;
pub mod parser;
pub mod server;
pub mod store;
pub mod timing;

/// Timestamp format accepted by the API.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Time of day as stored in the hours table.
pub const TIME_FORMAT: &str = "%H:%M:%S";
