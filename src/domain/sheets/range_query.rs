use std::fmt::{Display, Formatter};

/// A single spreadsheet values query.
///
/// Both parts are handed to the remote service verbatim; range syntax is not
/// checked locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeQuery {
    pub spreadsheet_id: String,
    pub range: String,
}

impl RangeQuery {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        RangeQuery {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        }
    }
}

impl Display for RangeQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.spreadsheet_id, self.range)
    }
}
