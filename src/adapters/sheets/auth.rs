use error_stack::{report, ResultExt};
use google_sheets4::hyper;
use google_sheets4::oauth2::{
    self, authenticator::ApplicationDefaultCredentialsTypes, authenticator::Authenticator,
};
use tracing::instrument;

use crate::ports::service_connector::ConnectError;

use super::{credentials::GoogleCredentials, HttpsConnector};

pub fn http_client() -> error_stack::Result<hyper::Client<HttpsConnector>, ConnectError> {
    let connector = google_sheets4::hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(ConnectError::NativeRoots)?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}

const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

fn metadata_token_url(host: &str) -> String {
    format!("http://{}{}", host, METADATA_TOKEN_PATH)
}

/// Builds an authenticator for `credentials`. Tokens are only requested when
/// the first API call is made.
#[instrument(skip_all, fields(kind = credentials.kind()))]
pub async fn auth(
    credentials: GoogleCredentials,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, ConnectError> {
    let authenticator = match credentials {
        GoogleCredentials::ServiceAccount(secret) => {
            oauth2::ServiceAccountAuthenticator::with_client(secret, client.clone())
                .build()
                .await
        }
        GoogleCredentials::AuthorizedUser(secret) => {
            oauth2::AuthorizedUserAuthenticator::with_client(secret, client.clone())
                .build()
                .await
        }
        GoogleCredentials::InstanceMetadata { metadata_host } => {
            let opts = oauth2::ApplicationDefaultCredentialsFlowOpts {
                metadata_url: metadata_host.map(|host| metadata_token_url(&host)),
            };
            match oauth2::ApplicationDefaultCredentialsAuthenticator::with_client(
                opts,
                client.clone(),
            )
            .await
            {
                ApplicationDefaultCredentialsTypes::InstanceMetadata(builder) => {
                    builder.build().await
                }
                // Discovery already rejected every credentials file, so a key
                // file showing up here is never used in place of the metadata flow.
                ApplicationDefaultCredentialsTypes::ServiceAccount(_) => {
                    return Err(report!(ConnectError::Authenticator).attach_printable(
                        "GOOGLE_APPLICATION_CREDENTIALS is set in the process environment",
                    ));
                }
            }
        }
    };

    authenticator.change_context(ConnectError::Authenticator)
}
