use crate::{error::ProviderError, provider::registry::SurfaceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// What the host shows the operator: a short summary and the full detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl From<&ProviderError> for Diagnostic {
    fn from(error: &ProviderError) -> Self {
        match error {
            ProviderError::ConfigValidation { reason, .. } => {
                Diagnostic::error("Invalid Attribute Combination", reason.clone())
            }
            ProviderError::CredentialSourceEmpty { .. } => Diagnostic::error(
                "Unable to Get Credentials from environment variable",
                error.to_string(),
            ),
            ProviderError::CredentialParse { cause } => {
                Diagnostic::error("Unable to Load Credentials", cause.clone())
            }
            ProviderError::ServiceConstruction { cause } => {
                Diagnostic::error("Unable to Create Service", cause.clone())
            }
            ProviderError::TypeMismatch {
                kind,
                expected,
                found,
            } => Diagnostic::error(
                match kind {
                    SurfaceKind::DataSource => "Unexpected Data Source Configure Type",
                    SurfaceKind::EphemeralResource => "Unexpected Ephemeral Resource Configure Type",
                },
                format!(
                    "Expected {}, got: {}. Please report this issue to the provider developers.",
                    expected, found
                ),
            ),
            ProviderError::NotConfigured { .. } => {
                Diagnostic::error("Unconfigured Google Sheets Service", error.to_string())
            }
            ProviderError::MissingAttribute { .. } => {
                Diagnostic::error("Missing Required Attribute", error.to_string())
            }
            ProviderError::Fetch { cause } => Diagnostic::error("Error getting values", cause.clone()),
            ProviderError::Projection { cause } => {
                Diagnostic::error("Error marshalling values", cause.clone())
            }
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(error: ProviderError) -> Self {
        Diagnostic::from(&error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics(Vec::new())
    }

    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.0.push(diagnostic.into());
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ProviderError> for Diagnostics {
    fn from(error: ProviderError) -> Self {
        Diagnostics(vec![error.into()])
    }
}
