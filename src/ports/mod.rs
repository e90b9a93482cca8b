pub mod environment;
pub mod service_connector;
pub mod values_service;
