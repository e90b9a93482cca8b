use super::sensitive::Sensitive;

pub const CREDENTIALS_JSON_ATTRIBUTE: &str = "credentials_json";
pub const CREDENTIALS_ENV_ATTRIBUTE: &str = "credentials_env";

/// Where the provider gets its Google credentials from.
///
/// Only one source can ever be selected; [`crate::adapters::config::ProviderConfig::validate`]
/// is the single place that turns the two optional attributes into this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialConfiguration {
    /// Read the credential JSON from the named environment variable.
    EnvVar(String),
    /// Credential JSON given inline.
    Explicit(Sensitive<String>),
    /// Neither attribute set: use the standard discovery chain.
    Default,
}

impl CredentialConfiguration {
    pub fn source_name(&self) -> &'static str {
        match self {
            CredentialConfiguration::EnvVar(_) => CREDENTIALS_ENV_ATTRIBUTE,
            CredentialConfiguration::Explicit(_) => CREDENTIALS_JSON_ATTRIBUTE,
            CredentialConfiguration::Default => "default",
        }
    }
}
