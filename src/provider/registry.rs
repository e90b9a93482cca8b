use super::{
    sensitive_sheet_data_source::SensitiveSheetDataSource, sheet_data_source::SheetDataSource,
    sheet_ephemeral_resource::SheetEphemeralResource, surface::SheetSurface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum SurfaceKind {
    #[strum(serialize = "data source")]
    DataSource,
    #[strum(serialize = "ephemeral resource")]
    EphemeralResource,
}

/// One retrieval surface the provider offers to the host.
pub struct SurfaceRegistration {
    pub kind: SurfaceKind,
    pub type_suffix: &'static str,
    pub constructor: fn() -> Box<dyn SheetSurface>,
}

impl SurfaceRegistration {
    /// Full type name as declared to the host, e.g. `googlesheets_sheet`.
    pub fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.type_suffix)
    }

    pub fn create(&self) -> Box<dyn SheetSurface> {
        (self.constructor)()
    }
}

impl std::fmt::Debug for SurfaceRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SurfaceRegistration({} {})", self.kind, self.type_suffix)
    }
}

fn new_sheet_data_source() -> Box<dyn SheetSurface> {
    Box::new(SheetDataSource::new())
}

fn new_sensitive_sheet_data_source() -> Box<dyn SheetSurface> {
    Box::new(SensitiveSheetDataSource::new())
}

fn new_sheet_ephemeral_resource() -> Box<dyn SheetSurface> {
    Box::new(SheetEphemeralResource::new())
}

pub static SURFACES: [SurfaceRegistration; 3] = [
    SurfaceRegistration {
        kind: SurfaceKind::DataSource,
        type_suffix: SheetDataSource::TYPE_SUFFIX,
        constructor: new_sheet_data_source,
    },
    SurfaceRegistration {
        kind: SurfaceKind::DataSource,
        type_suffix: SensitiveSheetDataSource::TYPE_SUFFIX,
        constructor: new_sensitive_sheet_data_source,
    },
    SurfaceRegistration {
        kind: SurfaceKind::EphemeralResource,
        type_suffix: SheetEphemeralResource::TYPE_SUFFIX,
        constructor: new_sheet_ephemeral_resource,
    },
];

pub fn surfaces_of(kind: SurfaceKind) -> impl Iterator<Item = &'static SurfaceRegistration> {
    SURFACES.iter().filter(move |s| s.kind == kind)
}

/// Finds the surface the host refers to by its full type name.
pub fn lookup(
    provider_type_name: &str,
    kind: SurfaceKind,
    type_name: &str,
) -> Option<&'static SurfaceRegistration> {
    surfaces_of(kind).find(|s| s.type_name(provider_type_name) == type_name)
}
