pub mod range_query;
pub mod value_matrix;
