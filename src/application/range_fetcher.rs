use tracing::instrument;

use crate::{
    domain::sheets::{range_query::RangeQuery, value_matrix::ValueMatrix},
    error::ProviderError,
    ports::values_service::ServiceHandle,
};

/// Fetches `query` with a single remote call. Failures are not retried.
#[instrument(skip(handle, query), fields(query = %query))]
pub async fn fetch(
    handle: &ServiceHandle,
    query: &RangeQuery,
) -> Result<ValueMatrix, ProviderError> {
    let matrix = handle
        .service()
        .get_values(query)
        .await
        .map_err(|report| {
            tracing::error!("Failed to fetch {}: {:?}", query, report);
            ProviderError::fetch(&report)
        })?;

    tracing::debug!("Fetched {} rows from {}", matrix.row_count(), query);
    Ok(matrix)
}
