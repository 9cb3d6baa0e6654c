use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

/// Why a single raw field could not be turned into a typed value.
///
/// These never abort a run. The normalisation step substitutes the field's
/// default and counts the substitution in a `ParseAudit`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    #[error("field is missing or blank")]
    Missing,

    #[error("field value '{raw}' could not be parsed")]
    Invalid { raw: String },
}

impl ParseIssue {
    pub fn invalid(raw: &str) -> Self {
        ParseIssue::Invalid {
            raw: raw.to_string(),
        }
    }
}
