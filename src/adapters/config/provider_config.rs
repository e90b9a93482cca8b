use config::Config;
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};

use crate::{
    domain::{
        credentials::{CredentialConfiguration, CREDENTIALS_ENV_ATTRIBUTE, CREDENTIALS_JSON_ATTRIBUTE},
        sensitive::Sensitive,
    },
    error::ProviderError,
};

const ENV_PREFIX: &str = "GOOGLESHEETS";

/// Provider block as supplied by the host. Both attributes are optional and
/// mutually exclusive; see [`ProviderConfig::validate`].
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub credentials_json: Option<Sensitive<String>>,
    #[serde(default)]
    pub credentials_env: Option<String>,
}

impl ProviderConfig {
    pub fn with_credentials_json(blob: impl Into<String>) -> Self {
        ProviderConfig {
            credentials_json: Some(Sensitive::new(blob.into())),
            credentials_env: None,
        }
    }

    pub fn with_credentials_env(name: impl Into<String>) -> Self {
        ProviderConfig {
            credentials_json: None,
            credentials_env: Some(name.into()),
        }
    }

    /// Loads the provider block from the optional file `name` (any format the
    /// `config` crate understands) overlaid with `GOOGLESHEETS_*` variables.
    pub fn load(name: &str) -> Result<Self, ProviderError> {
        let config = Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| invalid_config(name, e))?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ProviderError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .map_err(|e| invalid_config("provider", e))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        ProviderConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            invalid_config(path_str.trim_start_matches('.'), e)
        })
    }

    /// Enforces that at most one credential source is configured and picks it.
    ///
    /// Runs before any credential is read, so a conflicting configuration
    /// never reaches the environment or the network.
    pub fn validate(&self) -> Result<CredentialConfiguration, ProviderError> {
        match (&self.credentials_env, &self.credentials_json) {
            (Some(_), Some(_)) => Err(ProviderError::conflicting_attributes(
                CREDENTIALS_ENV_ATTRIBUTE,
                CREDENTIALS_JSON_ATTRIBUTE,
            )),
            (Some(name), None) => Ok(CredentialConfiguration::EnvVar(name.clone())),
            (None, Some(blob)) => Ok(CredentialConfiguration::Explicit(blob.clone())),
            (None, None) => Ok(CredentialConfiguration::Default),
        }
    }
}

fn invalid_config(path: &str, cause: impl std::fmt::Display) -> ProviderError {
    ProviderError::config_validation(path, cause.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_both_sources() {
        let config = ProviderConfig {
            credentials_json: Some(Sensitive::from("{}")),
            credentials_env: Some("SHEETS_CREDS".to_string()),
        };

        assert_eq!(
            config.validate(),
            Err(ProviderError::ConfigValidation {
                attribute: "credentials_env".to_string(),
                reason: "attribute \"credentials_env\" cannot be specified when \"credentials_json\" is specified".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_selects_source() {
        assert_eq!(
            ProviderConfig::with_credentials_env("SHEETS_CREDS").validate(),
            Ok(CredentialConfiguration::EnvVar("SHEETS_CREDS".to_string()))
        );
        assert_eq!(
            ProviderConfig::with_credentials_json("{}").validate(),
            Ok(CredentialConfiguration::Explicit(Sensitive::from("{}")))
        );
        assert_eq!(
            ProviderConfig::default().validate(),
            Ok(CredentialConfiguration::Default)
        );
    }

    #[test]
    fn test_empty_string_counts_as_set() {
        let config = ProviderConfig::with_credentials_json("");
        assert_eq!(
            config.validate(),
            Ok(CredentialConfiguration::Explicit(Sensitive::from("")))
        );
    }

    #[test]
    fn test_from_config_overrides() {
        let config = Config::builder()
            .set_override("credentials_env", "SHEETS_CREDS")
            .unwrap()
            .build()
            .unwrap();

        let provider_config = ProviderConfig::from_config(config).unwrap();
        assert_eq!(
            provider_config,
            ProviderConfig::with_credentials_env("SHEETS_CREDS")
        );
    }

    #[test]
    fn test_from_config_empty() {
        let config = Config::builder().build().unwrap();
        assert_eq!(
            ProviderConfig::from_config(config).unwrap(),
            ProviderConfig::default()
        );
    }

    #[test]
    fn test_from_config_reports_field_path() {
        let config = Config::builder()
            .set_override("credentials_env", vec!["a", "b"])
            .unwrap()
            .build()
            .unwrap();

        match ProviderConfig::from_config(config) {
            Err(ProviderError::ConfigValidation { attribute, .. }) => {
                assert_eq!(attribute, "credentials_env")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_reads_file() {
        let dir = std::env::temp_dir().join(format!(
            "googlesheets-provider-load-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("provider.toml"), "credentials_env = \"SHEETS_CREDS\"\n")
            .unwrap();

        let name = dir.join("provider");
        let provider_config = ProviderConfig::load(name.to_str().unwrap()).unwrap();

        assert_eq!(
            provider_config,
            ProviderConfig::with_credentials_env("SHEETS_CREDS")
        );
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let provider_config =
            ProviderConfig::load("/nonexistent/googlesheets-provider/provider").unwrap();
        assert_eq!(provider_config, ProviderConfig::default());
    }
}
