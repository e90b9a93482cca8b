pub mod config;
pub mod sheets;
