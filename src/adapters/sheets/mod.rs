pub mod auth;
pub mod connector;
pub mod credentials;
pub mod sheets_service;

pub type HttpsConnector =
    google_sheets4::hyper_rustls::HttpsConnector<google_sheets4::hyper::client::HttpConnector>;
