use std::{
    any::{type_name, Any},
    fmt::Debug,
    sync::Arc,
};

use crate::{error::ProviderError, ports::values_service::ServiceHandle, provider::registry::SurfaceKind};

/// An untyped value handed over by the host, remembering the name of the type
/// it was created from.
#[derive(Clone)]
pub struct HostData {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl HostData {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        HostData {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl Debug for HostData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HostData({})", self.type_name)
    }
}

impl From<ServiceHandle> for HostData {
    fn from(handle: ServiceHandle) -> Self {
        HostData::new(handle)
    }
}

impl ServiceHandle {
    /// Recovers the handle a surface receives from the host. `None` means the
    /// host is still probing and is not an error.
    pub fn from_host_data(
        data: Option<&HostData>,
        kind: SurfaceKind,
    ) -> Result<Option<ServiceHandle>, ProviderError> {
        let Some(data) = data else {
            return Ok(None);
        };

        data.downcast::<ServiceHandle>()
            .map(|handle| Some(ServiceHandle::clone(&handle)))
            .ok_or(ProviderError::TypeMismatch {
                kind,
                expected: type_name::<ServiceHandle>(),
                found: data.type_name(),
            })
    }
}
