mod diagnostics;
mod host_data;
mod provider;
pub mod registry;
pub mod schema;
mod sensitive_sheet_data_source;
mod sheet_data_source;
mod sheet_ephemeral_resource;
pub mod surface;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use host_data::HostData;
pub use provider::{ConfigureResponse, GoogleSheetsProvider, ProviderMetadata, PROVIDER_TYPE_NAME};
pub use sensitive_sheet_data_source::{SensitiveSheetDataSource, SensitiveSheetDataSourceModel};
pub use sheet_data_source::{SheetDataSource, SheetDataSourceModel};
pub use sheet_ephemeral_resource::{SheetEphemeralResource, SheetEphemeralResourceModel};
