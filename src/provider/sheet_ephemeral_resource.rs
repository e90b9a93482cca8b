use serde::Serialize;
use tracing::instrument;

use crate::{
    domain::sensitive::Sensitive, error::ProviderError, ports::values_service::ServiceHandle,
};

use super::{
    registry::SurfaceKind,
    schema::{Attribute, Schema},
    surface::{
        self, Persistence, Retrieved, ServiceState, SheetQueryConfig, SheetSurface,
        JSON_ATTRIBUTE, RANGE_ATTRIBUTE, SHEET_ID_ATTRIBUTE,
    },
};

/// `<provider>_sheet` ephemeral resource. Same output as the sensitive data
/// source, but the host never writes it to state.
#[derive(Debug, Default)]
pub struct SheetEphemeralResource {
    service: ServiceState,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SheetEphemeralResourceModel {
    pub sheet_id: String,
    pub range: String,
    pub json: Sensitive<String>,
}

impl SheetEphemeralResource {
    pub const TYPE_SUFFIX: &'static str = "sheet";

    pub fn new() -> Self {
        SheetEphemeralResource::default()
    }

    #[instrument(name = "SheetEphemeralResource::open", skip(self))]
    pub async fn open(
        &self,
        config: &SheetQueryConfig,
    ) -> Result<SheetEphemeralResourceModel, ProviderError> {
        let (query, json) = surface::retrieve_json(
            &self.service,
            SurfaceKind::EphemeralResource,
            Self::TYPE_SUFFIX,
            config,
        )
        .await?;

        Ok(SheetEphemeralResourceModel {
            sheet_id: query.spreadsheet_id,
            range: query.range,
            json: Sensitive::new(json),
        })
    }
}

impl From<SheetEphemeralResourceModel> for Retrieved {
    fn from(model: SheetEphemeralResourceModel) -> Self {
        Retrieved::new(Persistence::Ephemeral)
            .plain(SHEET_ID_ATTRIBUTE, model.sheet_id)
            .plain(RANGE_ATTRIBUTE, model.range)
            .sensitive(JSON_ATTRIBUTE, model.json)
    }
}

#[async_trait::async_trait]
impl SheetSurface for SheetEphemeralResource {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::EphemeralResource
    }

    fn type_suffix(&self) -> &'static str {
        Self::TYPE_SUFFIX
    }

    fn schema(&self) -> Schema {
        Schema::new([
            Attribute::required(SHEET_ID_ATTRIBUTE),
            Attribute::required(RANGE_ATTRIBUTE),
            Attribute::computed(JSON_ATTRIBUTE).sensitive(),
        ])
    }

    fn configure(&mut self, service: Option<ServiceHandle>) {
        self.service.configure(service);
    }

    fn is_configured(&self) -> bool {
        self.service.is_configured()
    }

    async fn retrieve(&self, config: &SheetQueryConfig) -> Result<Retrieved, ProviderError> {
        self.open(config).await.map(Retrieved::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{application::range_fetcher::tests::FakeValuesService, provider::HostData};

    #[tokio::test]
    async fn test_open_is_ephemeral_and_sensitive() {
        let service = FakeValuesService::returning(Some(vec![vec![json!("token"), json!(true)]]));
        let mut resource = SheetEphemeralResource::new();
        resource
            .configure_from_host(Some(&HostData::from(FakeValuesService::handle(&service))))
            .unwrap();

        let retrieved = resource
            .retrieve(&SheetQueryConfig::new("id", "Secrets!A1:B1"))
            .await
            .unwrap();

        assert_eq!(retrieved.persistence, Persistence::Ephemeral);
        let json = retrieved.get("json").unwrap();
        assert!(json.is_sensitive());
        assert_eq!(json.value(), "[[\"token\",true]]");
    }

    #[tokio::test]
    async fn test_null_configure_then_open_fails() {
        let service = FakeValuesService::returning(None);
        let mut resource = SheetEphemeralResource::new();
        resource.configure_from_host(None).unwrap();

        let error = resource
            .open(&SheetQueryConfig::new("id", "A1"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "ephemeral resource \"sheet\" has not been configured with a Google Sheets service"
        );
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_open_failure_sets_nothing() {
        let service = FakeValuesService::failing("oauth2: cannot fetch token: 401 Unauthorized");
        let mut resource = SheetEphemeralResource::new();
        resource.configure(Some(FakeValuesService::handle(&service)));

        let error = resource
            .open(&SheetQueryConfig::new("id", "A1"))
            .await
            .unwrap_err();

        assert!(error
            .to_string()
            .contains("oauth2: cannot fetch token: 401 Unauthorized"));
    }
}
