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
        JSON_ATTRIBUTE, RANGE_ATTRIBUTE, SENSITIVE_JSON_ATTRIBUTE, SHEET_ID_ATTRIBUTE,
    },
};

/// `<provider>_sheet` data source: the range as plain `json` plus an identical
/// sensitive copy in `sensitive_json`.
#[derive(Debug, Default)]
pub struct SheetDataSource {
    service: ServiceState,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SheetDataSourceModel {
    pub sheet_id: String,
    pub range: String,
    pub json: String,
    pub sensitive_json: Sensitive<String>,
}

impl SheetDataSource {
    pub const TYPE_SUFFIX: &'static str = "sheet";

    pub fn new() -> Self {
        SheetDataSource::default()
    }

    #[instrument(name = "SheetDataSource::read", skip(self))]
    pub async fn read(
        &self,
        config: &SheetQueryConfig,
    ) -> Result<SheetDataSourceModel, ProviderError> {
        let (query, json) = surface::retrieve_json(
            &self.service,
            SurfaceKind::DataSource,
            Self::TYPE_SUFFIX,
            config,
        )
        .await?;

        Ok(SheetDataSourceModel {
            sheet_id: query.spreadsheet_id,
            range: query.range,
            sensitive_json: Sensitive::new(json.clone()),
            json,
        })
    }
}

impl From<SheetDataSourceModel> for Retrieved {
    fn from(model: SheetDataSourceModel) -> Self {
        Retrieved::new(Persistence::Persisted)
            .plain(SHEET_ID_ATTRIBUTE, model.sheet_id)
            .plain(RANGE_ATTRIBUTE, model.range)
            .plain(JSON_ATTRIBUTE, model.json)
            .sensitive(SENSITIVE_JSON_ATTRIBUTE, model.sensitive_json)
    }
}

#[async_trait::async_trait]
impl SheetSurface for SheetDataSource {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::DataSource
    }

    fn type_suffix(&self) -> &'static str {
        Self::TYPE_SUFFIX
    }

    fn schema(&self) -> Schema {
        Schema::new([
            Attribute::required(SHEET_ID_ATTRIBUTE),
            Attribute::required(RANGE_ATTRIBUTE),
            Attribute::computed(JSON_ATTRIBUTE),
            Attribute::computed(SENSITIVE_JSON_ATTRIBUTE).sensitive(),
        ])
    }

    fn configure(&mut self, service: Option<ServiceHandle>) {
        self.service.configure(service);
    }

    fn is_configured(&self) -> bool {
        self.service.is_configured()
    }

    async fn retrieve(&self, config: &SheetQueryConfig) -> Result<Retrieved, ProviderError> {
        self.read(config).await.map(Retrieved::from)
    }
}
