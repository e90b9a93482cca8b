pub mod credential_resolver;
pub mod json_projector;
pub mod range_fetcher;
