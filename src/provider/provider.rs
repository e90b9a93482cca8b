use tracing::instrument;

use crate::{
    adapters::{config::ProviderConfig, sheets::connector::GoogleConnector},
    application::credential_resolver,
    domain::credentials::{CREDENTIALS_ENV_ATTRIBUTE, CREDENTIALS_JSON_ATTRIBUTE},
    ports::{
        environment::{Environment, ProcessEnvironment},
        service_connector::ServiceConnector,
        values_service::ServiceHandle,
    },
};

use super::{
    diagnostics::Diagnostics,
    host_data::HostData,
    registry::{self, SurfaceKind, SurfaceRegistration},
    schema::{Attribute, Schema},
};

pub const PROVIDER_TYPE_NAME: &str = "googlesheets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub version: String,
}

/// What `configure` hands to each kind of surface. All three carry the same
/// handle.
#[derive(Debug, Clone)]
pub struct ConfigureResponse {
    pub resource_data: ServiceHandle,
    pub data_source_data: ServiceHandle,
    pub ephemeral_resource_data: ServiceHandle,
}

impl ConfigureResponse {
    fn new(handle: ServiceHandle) -> Self {
        ConfigureResponse {
            resource_data: handle.clone(),
            data_source_data: handle.clone(),
            ephemeral_resource_data: handle,
        }
    }

    pub fn host_data(&self, kind: SurfaceKind) -> HostData {
        match kind {
            SurfaceKind::DataSource => HostData::from(self.data_source_data.clone()),
            SurfaceKind::EphemeralResource => HostData::from(self.ephemeral_resource_data.clone()),
        }
    }
}

/// The Google Sheets provider as seen by the host.
pub struct GoogleSheetsProvider<C = GoogleConnector, E = ProcessEnvironment> {
    version: String,
    connector: C,
    env: E,
}

impl GoogleSheetsProvider {
    pub fn new(version: impl Into<String>) -> Self {
        GoogleSheetsProvider::with_connector(version, GoogleConnector, ProcessEnvironment)
    }
}

impl<C: ServiceConnector, E: Environment> GoogleSheetsProvider<C, E> {
    pub fn with_connector(version: impl Into<String>, connector: C, env: E) -> Self {
        GoogleSheetsProvider {
            version: version.into(),
            connector,
            env,
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME,
            version: self.version.clone(),
        }
    }

    pub fn schema(&self) -> Schema {
        Schema::new([
            Attribute::optional(CREDENTIALS_JSON_ATTRIBUTE).sensitive(),
            Attribute::optional(CREDENTIALS_ENV_ATTRIBUTE),
        ])
    }

    /// Static check of the provider block, run by the host before configure.
    pub fn validate_config(&self, config: &ProviderConfig) -> Result<(), Diagnostics> {
        config.validate().map(|_| ()).map_err(Diagnostics::from)
    }

    /// Resolves credentials and builds the one service handle shared by every
    /// surface for this configuration cycle.
    #[instrument(name = "GoogleSheetsProvider::configure", skip_all)]
    pub async fn configure(&self, config: &ProviderConfig) -> Result<ConfigureResponse, Diagnostics> {
        let credentials = config.validate()?;
        let handle = credential_resolver::resolve(&credentials, &self.env, &self.connector).await?;

        tracing::info!("Configured Google Sheets service from {}", credentials.source_name());
        Ok(ConfigureResponse::new(handle))
    }

    /// This provider manages no resources.
    pub fn resources(&self) -> Vec<&'static SurfaceRegistration> {
        Vec::new()
    }

    pub fn data_sources(&self) -> Vec<&'static SurfaceRegistration> {
        registry::surfaces_of(SurfaceKind::DataSource).collect()
    }

    pub fn ephemeral_resources(&self) -> Vec<&'static SurfaceRegistration> {
        registry::surfaces_of(SurfaceKind::EphemeralResource).collect()
    }

    pub fn lookup(&self, kind: SurfaceKind, type_name: &str) -> Option<&'static SurfaceRegistration> {
        registry::lookup(PROVIDER_TYPE_NAME, kind, type_name)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use serde_json::json;

    use super::*;
    use crate::{
        application::{
            credential_resolver::tests::FakeConnector, range_fetcher::tests::FakeValuesService,
        },
        error::ProviderError,
        provider::{
            surface::{SheetQueryConfig, SheetSurface},
            Diagnostic,
        },
    };

    fn provider(
        env: &[(&str, &str)],
    ) -> GoogleSheetsProvider<FakeConnector, HashMap<String, String>> {
        let env = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GoogleSheetsProvider::with_connector("1.2.3", FakeConnector::default(), env)
    }

    #[test]
    fn test_metadata_and_schema() {
        let provider = provider(&[]);
        assert_eq!(
            provider.metadata(),
            ProviderMetadata {
                type_name: "googlesheets",
                version: "1.2.3".to_string()
            }
        );
        let schema = provider.schema();
        assert!(schema.attribute("credentials_json").unwrap().sensitive);
        assert!(!schema.attribute("credentials_env").unwrap().sensitive);
    }

    #[test]
    fn test_surface_lists() {
        let provider = provider(&[]);
        assert!(provider.resources().is_empty());

        let data_sources: Vec<String> = provider
            .data_sources()
            .iter()
            .map(|s| s.type_name(PROVIDER_TYPE_NAME))
            .collect();
        assert_eq!(
            data_sources,
            vec!["googlesheets_sheet", "googlesheets_sensitive_sheet"]
        );

        let ephemeral: Vec<String> = provider
            .ephemeral_resources()
            .iter()
            .map(|s| s.type_name(PROVIDER_TYPE_NAME))
            .collect();
        assert_eq!(ephemeral, vec!["googlesheets_sheet"]);
    }

    #[tokio::test]
    async fn test_conflicting_credentials_fail_before_any_call() {
        let provider = provider(&[("SHEETS_CREDS", "{}")]);
        let config = ProviderConfig {
            credentials_json: Some("{}".into()),
            credentials_env: Some("SHEETS_CREDS".to_string()),
        };

        assert!(provider.validate_config(&config).is_err());
        let diagnostics = provider.configure(&config).await.unwrap_err();

        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Invalid Attribute Combination");
        assert_eq!(provider.connector.parse_count(), 0);
        assert_eq!(provider.connector.discovery_count(), 0);
        assert_eq!(provider.connector.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_env_fails_without_discovery() {
        let provider = provider(&[("SHEETS_CREDS", "")]);
        let diagnostics = provider
            .configure(&ProviderConfig::with_credentials_env("SHEETS_CREDS"))
            .await
            .unwrap_err();

        assert_eq!(
            diagnostics.iter().next(),
            Some(&Diagnostic::from(ProviderError::CredentialSourceEmpty {
                name: "SHEETS_CREDS".to_string()
            }))
        );
        assert_eq!(provider.connector.discovery_count(), 0);
    }

    #[tokio::test]
    async fn test_no_credentials_discovers_once() {
        let provider = provider(&[]);
        provider.configure(&ProviderConfig::default()).await.unwrap();
        assert_eq!(provider.connector.discovery_count(), 1);
    }

    #[tokio::test]
    async fn test_configure_then_read_every_surface() {
        let provider = provider(&[("SHEETS_CREDS", "{\"type\":\"service_account\"}")]);
        let response = provider
            .configure(&ProviderConfig::with_credentials_env("SHEETS_CREDS"))
            .await
            .unwrap();

        for kind in [SurfaceKind::DataSource, SurfaceKind::EphemeralResource] {
            let host_data = response.host_data(kind);
            let surfaces: Vec<_> = registry::surfaces_of(kind).collect();
            for registration in surfaces {
                let mut surface = registration.create();
                surface.configure_from_host(Some(&host_data)).unwrap();
                let retrieved = surface
                    .retrieve(&SheetQueryConfig::new("id", "A1"))
                    .await
                    .unwrap();
                assert_eq!(retrieved.get("json").unwrap().value(), "[]");
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_reads_share_one_handle() {
        let service = FakeValuesService::returning(Some(vec![vec![json!("a"), json!(1)]]));
        let handle = FakeValuesService::handle(&service);

        let surfaces: Vec<Arc<dyn SheetSurface>> = registry::SURFACES
            .iter()
            .map(|registration| {
                let mut surface = registration.create();
                surface.configure(Some(handle.clone()));
                Arc::from(surface)
            })
            .collect();

        let tasks = (0..8).flat_map(|i| {
            surfaces.iter().map(move |surface| {
                let surface = Arc::clone(surface);
                tokio::spawn(async move {
                    surface
                        .retrieve(&SheetQueryConfig::new(format!("sheet-{}", i), "A1:B1"))
                        .await
                })
            })
        });

        let results = futures::future::join_all(tasks).await;

        assert_eq!(results.len(), 24);
        for result in results {
            let retrieved = result.unwrap().unwrap();
            assert_eq!(retrieved.get("json").unwrap().value(), "[[\"a\",1]]");
        }
        assert_eq!(service.call_count(), 24);
    }
}
