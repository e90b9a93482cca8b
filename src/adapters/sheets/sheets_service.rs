use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{api::Scope, Sheets};
use tracing::instrument;

use crate::{
    domain::sheets::{range_query::RangeQuery, value_matrix::ValueMatrix},
    ports::values_service::{ValuesService, ValuesServiceError},
};

use super::HttpsConnector;

/// [`ValuesService`] backed by the `google-sheets4` hub.
pub struct SheetsValuesService {
    pub(super) hub: Sheets<HttpsConnector>,
}

impl SheetsValuesService {
    pub fn new(hub: Sheets<HttpsConnector>) -> Self {
        SheetsValuesService { hub }
    }
}

impl Debug for SheetsValuesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SheetsValuesService")
    }
}

#[async_trait::async_trait]
impl ValuesService for SheetsValuesService {
    #[instrument(skip(self), fields(spreadsheet_id = %query.spreadsheet_id, range = %query.range))]
    async fn get_values(
        &self,
        query: &RangeQuery,
    ) -> error_stack::Result<ValueMatrix, ValuesServiceError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&query.spreadsheet_id, &query.range)
            .add_scope(Scope::SpreadsheetReadonly)
            .doit()
            .await
            .change_context(ValuesServiceError::FailedToFetchRange)?;

        let value_range = response.1;
        Ok(ValueMatrix::from_optional(value_range.values))
    }
}
