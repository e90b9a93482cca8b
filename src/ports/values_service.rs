use std::{fmt::Debug, sync::Arc};

use thiserror::Error;

use crate::domain::sheets::{range_query::RangeQuery, value_matrix::ValueMatrix};

#[derive(Error, Debug)]
pub enum ValuesServiceError {
    #[error("Failed to fetch range")]
    FailedToFetchRange,
}

/// The remote spreadsheet values API, reduced to the one call this crate needs.
#[async_trait::async_trait]
pub trait ValuesService: Send + Sync {
    /// Performs exactly one remote request for `query`.
    async fn get_values(
        &self,
        query: &RangeQuery,
    ) -> error_stack::Result<ValueMatrix, ValuesServiceError>;
}

/// The authenticated values service shared by every retrieval surface.
///
/// Cloning shares the same underlying client. The handle is never mutated after
/// construction, so clones can be used from any number of tasks at once.
#[derive(Clone)]
pub struct ServiceHandle {
    service: Arc<dyn ValuesService>,
}

impl ServiceHandle {
    pub fn new(service: impl ValuesService + 'static) -> Self {
        ServiceHandle {
            service: Arc::new(service),
        }
    }

    pub fn from_arc(service: Arc<dyn ValuesService>) -> Self {
        ServiceHandle { service }
    }

    pub fn service(&self) -> &dyn ValuesService {
        self.service.as_ref()
    }
}

impl Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServiceHandle {{ .. }}")
    }
}
