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

/// `<provider>_sensitive_sheet` data source: only a sensitive `json`.
#[derive(Debug, Default)]
pub struct SensitiveSheetDataSource {
    service: ServiceState,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SensitiveSheetDataSourceModel {
    pub sheet_id: String,
    pub range: String,
    pub json: Sensitive<String>,
}

impl SensitiveSheetDataSource {
    pub const TYPE_SUFFIX: &'static str = "sensitive_sheet";

    pub fn new() -> Self {
        SensitiveSheetDataSource::default()
    }

    #[instrument(name = "SensitiveSheetDataSource::read", skip(self))]
    pub async fn read(
        &self,
        config: &SheetQueryConfig,
    ) -> Result<SensitiveSheetDataSourceModel, ProviderError> {
        let (query, json) = surface::retrieve_json(
            &self.service,
            SurfaceKind::DataSource,
            Self::TYPE_SUFFIX,
            config,
        )
        .await?;

        Ok(SensitiveSheetDataSourceModel {
            sheet_id: query.spreadsheet_id,
            range: query.range,
            json: Sensitive::new(json),
        })
    }
}

impl From<SensitiveSheetDataSourceModel> for Retrieved {
    fn from(model: SensitiveSheetDataSourceModel) -> Self {
        Retrieved::new(Persistence::Persisted)
            .plain(SHEET_ID_ATTRIBUTE, model.sheet_id)
            .plain(RANGE_ATTRIBUTE, model.range)
            .sensitive(JSON_ATTRIBUTE, model.json)
    }
}

#[async_trait::async_trait]
impl SheetSurface for SensitiveSheetDataSource {
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
        self.read(config).await.map(Retrieved::from)
    }
}
