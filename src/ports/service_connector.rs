use thiserror::Error;

use super::{environment::Environment, values_service::ServiceHandle};

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("credentials are not valid JSON")]
    InvalidJson,
    #[error("credentials JSON has no \"type\" field")]
    MissingType,
    #[error("unsupported credentials type \"{0}\"")]
    UnsupportedType(String),
    #[error("could not read credentials file {0}")]
    UnreadableFile(String),
    #[error("could not find default credentials")]
    DiscoveryFailed,
}

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("could not create an authenticator")]
    Authenticator,
    #[error("could not load native root certificates")]
    NativeRoots,
}

/// Turns credential material into a live [`ServiceHandle`].
///
/// Parsing never talks to the network. Discovery may only check whether a
/// metadata server answers; [`ServiceConnector::connect`] builds the client.
#[async_trait::async_trait]
pub trait ServiceConnector: Send + Sync {
    type Credentials: Send;

    fn parse_credentials(
        &self,
        blob: &str,
    ) -> error_stack::Result<Self::Credentials, CredentialsError>;

    async fn discover_default(
        &self,
        env: &dyn Environment,
    ) -> error_stack::Result<Self::Credentials, CredentialsError>;

    async fn connect(
        &self,
        credentials: Self::Credentials,
    ) -> error_stack::Result<ServiceHandle, ConnectError>;
}
