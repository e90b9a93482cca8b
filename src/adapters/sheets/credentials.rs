use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{self, authorized_user::AuthorizedUserSecret};
use tracing::instrument;

use crate::ports::{environment::Environment, service_connector::CredentialsError};

pub const APPLICATION_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";
const WELL_KNOWN_FILE: &str = "application_default_credentials.json";
const METADATA_SERVER_ADDR: &str = "169.254.169.254:80";
const METADATA_CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

const SERVICE_ACCOUNT_TYPE: &str = "service_account";
const AUTHORIZED_USER_TYPE: &str = "authorized_user";

/// Credential material ready to be exchanged for an authenticator.
pub enum GoogleCredentials {
    ServiceAccount(oauth2::ServiceAccountKey),
    AuthorizedUser(AuthorizedUserSecret),
    /// No file found but a metadata server is around. `metadata_host` comes
    /// from `GCE_METADATA_HOST`; `None` means the well-known address.
    InstanceMetadata { metadata_host: Option<String> },
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GoogleCredentials({})", self.kind())
    }
}

impl GoogleCredentials {
    pub fn kind(&self) -> &'static str {
        match self {
            GoogleCredentials::ServiceAccount(_) => SERVICE_ACCOUNT_TYPE,
            GoogleCredentials::AuthorizedUser(_) => AUTHORIZED_USER_TYPE,
            GoogleCredentials::InstanceMetadata { .. } => "instance_metadata",
        }
    }
}

/// Parses a credentials JSON document as produced by the Cloud console or by
/// `gcloud auth application-default login`.
pub fn parse_credentials_json(
    blob: &str,
) -> error_stack::Result<GoogleCredentials, CredentialsError> {
    let value: serde_json::Value =
        serde_json::from_str(blob).change_context(CredentialsError::InvalidJson)?;

    let key_type = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or(report!(CredentialsError::MissingType))?
        .to_string();

    match key_type.as_str() {
        SERVICE_ACCOUNT_TYPE => serde_json::from_value(value)
            .map(GoogleCredentials::ServiceAccount)
            .change_context(CredentialsError::InvalidJson)
            .attach_printable("service account key"),
        AUTHORIZED_USER_TYPE => serde_json::from_value(value)
            .map(GoogleCredentials::AuthorizedUser)
            .change_context(CredentialsError::InvalidJson)
            .attach_printable("authorized user secret"),
        _ => Err(report!(CredentialsError::UnsupportedType(key_type))),
    }
}

/// Looks for credentials the way Google's client libraries do:
/// 1. the file named by `GOOGLE_APPLICATION_CREDENTIALS`,
/// 2. gcloud's well-known application default credentials file,
/// 3. the instance metadata server, if `GCE_METADATA_HOST` names one or the
///    well-known address accepts a connection.
///
/// Fails with [`CredentialsError::DiscoveryFailed`] when none of them apply.
#[instrument(skip(env))]
pub async fn discover_default_credentials(
    env: &dyn Environment,
) -> error_stack::Result<GoogleCredentials, CredentialsError> {
    if let Some(path) = env
        .var(APPLICATION_CREDENTIALS_ENV)
        .filter(|path| !path.is_empty())
    {
        tracing::debug!("Using credentials file from ${}", APPLICATION_CREDENTIALS_ENV);
        return read_credentials_file(Path::new(&path))
            .await
            .change_context(CredentialsError::DiscoveryFailed);
    }

    if let Some(path) = well_known_file(env) {
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!("Using gcloud credentials file {}", path.display());
            return read_credentials_file(&path)
                .await
                .change_context(CredentialsError::DiscoveryFailed);
        }
    }

    if let Some(host) = env.var(METADATA_HOST_ENV).filter(|host| !host.is_empty()) {
        tracing::debug!("Using metadata server {} from ${}", host, METADATA_HOST_ENV);
        return Ok(GoogleCredentials::InstanceMetadata {
            metadata_host: Some(host),
        });
    }

    if metadata_server_reachable().await {
        tracing::debug!("No credentials file found, using instance metadata");
        return Ok(GoogleCredentials::InstanceMetadata {
            metadata_host: None,
        });
    }

    Err(report!(CredentialsError::DiscoveryFailed)).attach_printable(format!(
        "${} is unset, no gcloud credentials file and no metadata server",
        APPLICATION_CREDENTIALS_ENV
    ))
}

async fn metadata_server_reachable() -> bool {
    matches!(
        tokio::time::timeout(
            METADATA_CONNECT_TIMEOUT,
            tokio::net::TcpStream::connect(METADATA_SERVER_ADDR),
        )
        .await,
        Ok(Ok(_))
    )
}

async fn read_credentials_file(
    path: &Path,
) -> error_stack::Result<GoogleCredentials, CredentialsError> {
    let blob = tokio::fs::read_to_string(path)
        .await
        .change_context_lazy(|| CredentialsError::UnreadableFile(path.display().to_string()))?;

    parse_credentials_json(&blob)
}

fn well_known_file(env: &dyn Environment) -> Option<PathBuf> {
    let config_dir = if cfg!(windows) {
        PathBuf::from(env.var("APPDATA")?)
    } else {
        PathBuf::from(env.var("HOME")?).join(".config")
    };

    Some(config_dir.join("gcloud").join(WELL_KNOWN_FILE))
}
