use error_stack::ResultExt;
use google_sheets4::Sheets;
use tracing::instrument;

use crate::ports::{
    environment::Environment,
    service_connector::{ConnectError, CredentialsError, ServiceConnector},
    values_service::ServiceHandle,
};

use super::{
    auth,
    credentials::{self, GoogleCredentials},
    sheets_service::SheetsValuesService,
};

/// Connects to the real Google Sheets API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleConnector;

#[async_trait::async_trait]
impl ServiceConnector for GoogleConnector {
    type Credentials = GoogleCredentials;

    fn parse_credentials(
        &self,
        blob: &str,
    ) -> error_stack::Result<GoogleCredentials, CredentialsError> {
        credentials::parse_credentials_json(blob)
    }

    async fn discover_default(
        &self,
        env: &dyn Environment,
    ) -> error_stack::Result<GoogleCredentials, CredentialsError> {
        credentials::discover_default_credentials(env).await
    }

    #[instrument(name = "GoogleConnector::connect", skip_all)]
    async fn connect(
        &self,
        credentials: GoogleCredentials,
    ) -> error_stack::Result<ServiceHandle, ConnectError> {
        let client = auth::http_client()
            .attach_printable("Google Sheets service could not be created")?;
        let authenticator = auth::auth(credentials, client.clone())
            .await
            .attach_printable("Google Sheets service could not be created")?;

        let hub = Sheets::new(client, authenticator);
        Ok(ServiceHandle::new(SheetsValuesService::new(hub)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        application::credential_resolver, domain::credentials::CredentialConfiguration,
        error::ProviderError,
    };

    #[tokio::test]
    async fn test_default_resolve_without_credentials_fails() {
        let env = HashMap::from([(
            "HOME".to_string(),
            "/nonexistent/googlesheets-home".to_string(),
        )]);

        let error =
            credential_resolver::resolve(&CredentialConfiguration::Default, &env, &GoogleConnector)
                .await
                .unwrap_err();

        match error {
            ProviderError::CredentialParse { cause } => {
                assert_eq!(cause, "could not find default credentials")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_explicit_garbage_is_parse_error() {
        let config = CredentialConfiguration::Explicit("{\"type\": 7}".into());

        let error = credential_resolver::resolve(&config, &HashMap::new(), &GoogleConnector)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ProviderError::CredentialParse {
                cause: "credentials JSON has no \"type\" field".to_string()
            }
        );
    }
}
