use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::instrument;

use crate::{
    application::{json_projector, range_fetcher},
    domain::{sensitive::Sensitive, sheets::range_query::RangeQuery},
    error::ProviderError,
    ports::values_service::ServiceHandle,
};

use super::{host_data::HostData, registry::SurfaceKind, schema::Schema};

pub const SHEET_ID_ATTRIBUTE: &str = "sheet_id";
pub const RANGE_ATTRIBUTE: &str = "range";
pub const JSON_ATTRIBUTE: &str = "json";
pub const SENSITIVE_JSON_ATTRIBUTE: &str = "sensitive_json";

/// Caller supplied arguments of every retrieval surface. Both are required;
/// they are optional here because the host may send them null.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetQueryConfig {
    pub sheet_id: Option<String>,
    pub range: Option<String>,
}

impl SheetQueryConfig {
    pub fn new(sheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        SheetQueryConfig {
            sheet_id: Some(sheet_id.into()),
            range: Some(range.into()),
        }
    }

    pub fn to_query(&self) -> Result<RangeQuery, ProviderError> {
        let sheet_id = self.sheet_id.as_ref().ok_or(ProviderError::MissingAttribute {
            attribute: SHEET_ID_ATTRIBUTE,
        })?;
        let range = self.range.as_ref().ok_or(ProviderError::MissingAttribute {
            attribute: RANGE_ATTRIBUTE,
        })?;

        Ok(RangeQuery::new(sheet_id.as_str(), range.as_str()))
    }
}

/// Whether the host stores the result in its state between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Persisted,
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Plain(String),
    Sensitive(Sensitive<String>),
}

impl AttributeValue {
    pub fn is_sensitive(&self) -> bool {
        matches!(self, AttributeValue::Sensitive(_))
    }

    pub fn value(&self) -> &str {
        match self {
            AttributeValue::Plain(value) => value,
            AttributeValue::Sensitive(value) => value.as_str(),
        }
    }
}

/// Result of one retrieval in the host's attribute form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieved {
    pub persistence: Persistence,
    pub attributes: BTreeMap<&'static str, AttributeValue>,
}

impl Retrieved {
    pub fn new(persistence: Persistence) -> Self {
        Retrieved {
            persistence,
            attributes: BTreeMap::new(),
        }
    }

    pub fn plain(mut self, name: &'static str, value: String) -> Self {
        self.attributes.insert(name, AttributeValue::Plain(value));
        self
    }

    pub fn sensitive(mut self, name: &'static str, value: Sensitive<String>) -> Self {
        self.attributes.insert(name, AttributeValue::Sensitive(value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// Unconfigured until the host hands over a service handle.
#[derive(Debug, Clone, Default)]
pub enum ServiceState {
    #[default]
    Unconfigured,
    Configured(ServiceHandle),
}

impl ServiceState {
    /// Takes the first handle it is given. `None` and any later handle leave
    /// the state as it is.
    pub fn configure(&mut self, service: Option<ServiceHandle>) {
        if let Some(handle) = service {
            if !self.is_configured() {
                *self = ServiceState::Configured(handle);
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ServiceState::Configured(_))
    }

    pub fn handle(&self, kind: SurfaceKind, type_suffix: &str) -> Result<&ServiceHandle, ProviderError> {
        match self {
            ServiceState::Configured(handle) => Ok(handle),
            ServiceState::Unconfigured => Err(ProviderError::NotConfigured {
                surface: format!("{} \"{}\"", kind, type_suffix),
            }),
        }
    }
}

/// The part every surface shares: check state and inputs, fetch, encode.
///
/// Returns the query that was run and its JSON text. Nothing is produced if
/// any step fails, so surfaces never assign partial output.
#[instrument(skip(state, config))]
pub async fn retrieve_json(
    state: &ServiceState,
    kind: SurfaceKind,
    type_suffix: &str,
    config: &SheetQueryConfig,
) -> Result<(RangeQuery, String), ProviderError> {
    let handle = state.handle(kind, type_suffix)?;
    let query = config.to_query()?;
    let matrix = range_fetcher::fetch(handle, &query).await?;
    let json = json_projector::project(&matrix)?;
    Ok((query, json))
}

/// A retrieval surface as the host drives it.
#[async_trait::async_trait]
pub trait SheetSurface: Send + Sync {
    fn kind(&self) -> SurfaceKind;

    fn type_suffix(&self) -> &'static str;

    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.type_suffix())
    }

    fn schema(&self) -> Schema;

    fn configure(&mut self, service: Option<ServiceHandle>);

    fn is_configured(&self) -> bool;

    /// Configure from the untyped value the host passes around.
    fn configure_from_host(&mut self, data: Option<&HostData>) -> Result<(), ProviderError> {
        let service = ServiceHandle::from_host_data(data, self.kind())?;
        self.configure(service);
        Ok(())
    }

    /// `Read` for data sources, `Open` for ephemeral resources.
    async fn retrieve(&self, config: &SheetQueryConfig) -> Result<Retrieved, ProviderError>;
}
