use serde::Serialize;
use serde_json::Value;

/// Cell values of a range, row by row.
///
/// Rows keep the length the remote service returned them with, so trailing
/// empty cells are simply missing. Cells are whatever JSON scalar the service
/// produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueMatrix(Vec<Vec<Value>>);

impl ValueMatrix {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        ValueMatrix(rows)
    }

    /// An absent `values` field is how the service reports an empty range.
    pub fn from_optional(rows: Option<Vec<Vec<Value>>>) -> Self {
        ValueMatrix(rows.unwrap_or_default())
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.0
    }
}

impl From<Vec<Vec<Value>>> for ValueMatrix {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        ValueMatrix(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_values_is_empty_matrix() {
        let matrix = ValueMatrix::from_optional(None);
        assert!(matrix.is_empty());
        assert_eq!(matrix.row_count(), 0);
    }

    #[test]
    fn test_short_rows_are_not_padded() {
        let matrix = ValueMatrix::new(vec![
            vec![json!("a"), json!("b"), json!("c")],
            vec![json!("d")],
        ]);
        assert_eq!(matrix.rows()[0].len(), 3);
        assert_eq!(matrix.rows()[1].len(), 1);
    }
}
