use tracing::instrument;

use crate::{
    domain::credentials::CredentialConfiguration,
    error::ProviderError,
    ports::{
        environment::Environment, service_connector::ServiceConnector,
        values_service::ServiceHandle,
    },
};

/// Resolves `config` to a live service handle.
///
/// Precedence is fixed: a named environment variable, then inline JSON, then
/// default discovery. An unset or empty variable is an error of its own and
/// never falls through to discovery.
#[instrument(skip_all, fields(source = config.source_name()))]
pub async fn resolve<C: ServiceConnector>(
    config: &CredentialConfiguration,
    env: &dyn Environment,
    connector: &C,
) -> Result<ServiceHandle, ProviderError> {
    let credentials = match config {
        CredentialConfiguration::EnvVar(name) => {
            let blob = env
                .var(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ProviderError::CredentialSourceEmpty { name: name.clone() })?;

            tracing::debug!("Loading credentials from ${}", name);
            connector.parse_credentials(&blob)
        }
        CredentialConfiguration::Explicit(blob) => {
            tracing::debug!("Loading credentials from credentials_json");
            connector.parse_credentials(blob.expose())
        }
        CredentialConfiguration::Default => {
            tracing::debug!("Looking up default credentials");
            connector.discover_default(env).await
        }
    }
    .map_err(|report| {
        tracing::error!("Unable to load credentials: {:?}", report);
        ProviderError::credential_parse(&report)
    })?;

    connector.connect(credentials).await.map_err(|report| {
        tracing::error!("Unable to create service: {:?}", report);
        ProviderError::service_construction(&report)
    })
}
