pub mod credentials;
pub mod sensitive;
pub mod sheets;
