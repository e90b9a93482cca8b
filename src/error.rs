use error_stack::{Context, FrameKind, Report};
use thiserror::Error;

use crate::provider::registry::SurfaceKind;

/// Every way a configuration or retrieval can fail.
///
/// None of these are retried. Variants that wrap a lower-level failure keep
/// its text in `cause` unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("invalid provider configuration for \"{attribute}\": {reason}")]
    ConfigValidation { attribute: String, reason: String },
    #[error("${name} is empty")]
    CredentialSourceEmpty { name: String },
    #[error("unable to load credentials: {cause}")]
    CredentialParse { cause: String },
    #[error("unable to create service: {cause}")]
    ServiceConstruction { cause: String },
    #[error("expected {expected}, got: {found}")]
    TypeMismatch {
        kind: SurfaceKind,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{surface} has not been configured with a Google Sheets service")]
    NotConfigured { surface: String },
    #[error("the argument \"{attribute}\" is required, but no definition was found")]
    MissingAttribute { attribute: &'static str },
    #[error("error getting values: {cause}")]
    Fetch { cause: String },
    #[error("error marshalling values: {cause}")]
    Projection { cause: String },
}

impl ProviderError {
    pub fn config_validation(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        ProviderError::ConfigValidation {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    pub fn conflicting_attributes(first: &str, second: &str) -> Self {
        Self::config_validation(
            first,
            format!(
                "attribute \"{}\" cannot be specified when \"{}\" is specified",
                first, second
            ),
        )
    }

    pub fn credential_parse<C: Context>(report: &Report<C>) -> Self {
        ProviderError::CredentialParse {
            cause: report_chain(report),
        }
    }

    pub fn service_construction<C: Context>(report: &Report<C>) -> Self {
        ProviderError::ServiceConstruction {
            cause: report_chain(report),
        }
    }

    pub fn fetch<C: Context>(report: &Report<C>) -> Self {
        ProviderError::Fetch {
            cause: report_chain(report),
        }
    }
}

/// Joins every context of `report` from outermost to root cause, so the
/// original error text ends up in the message untouched.
pub fn report_chain<C>(report: &Report<C>) -> String {
    report
        .frames()
        .filter_map(|frame| match frame.kind() {
            FrameKind::Context(context) => Some(context.to_string()),
            FrameKind::Attachment(_) => None,
        })
        .collect::<Vec<_>>()
        .join(": ")
}
