use crate::{domain::sheets::value_matrix::ValueMatrix, error::ProviderError};

/// Encodes the matrix as a compact JSON array of arrays.
///
/// Row and column order are kept as fetched and cells are written as the JSON
/// values they already are. An empty matrix becomes `[]`.
pub fn project(matrix: &ValueMatrix) -> Result<String, ProviderError> {
    serde_json::to_string(matrix).map_err(|e| ProviderError::Projection {
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_strings() {
        let matrix = ValueMatrix::new(vec![
            vec![json!("a"), json!("1")],
            vec![json!("b"), json!("2")],
        ]);
        assert_eq!(project(&matrix).unwrap(), r#"[["a","1"],["b","2"]]"#);
    }

    #[test]
    fn test_project_empty() {
        assert_eq!(project(&ValueMatrix::default()).unwrap(), "[]");
        assert_eq!(project(&ValueMatrix::from_optional(None)).unwrap(), "[]");
    }

    #[test]
    fn test_project_keeps_scalar_types_and_ragged_rows() {
        let matrix = ValueMatrix::new(vec![
            vec![json!("name"), json!(1.5), json!(true)],
            vec![json!(42)],
            vec![],
        ]);
        assert_eq!(
            project(&matrix).unwrap(),
            r#"[["name",1.5,true],[42],[]]"#
        );
    }

    #[test]
    fn test_project_escapes_strings() {
        let matrix = ValueMatrix::new(vec![vec![json!("say \"hi\"\n")]]);
        assert_eq!(project(&matrix).unwrap(), r#"[["say \"hi\"\n"]]"#);
    }
}
