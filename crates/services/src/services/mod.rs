pub mod config;
pub mod dashboard;
pub mod feed_client;
pub mod refresh;
