use crate::form::{FormError, FormResult};

use super::validated::ValidatedSignup;

/// Pretty-printed JSON of the last accepted submission.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubmissionPreview(String);

impl SubmissionPreview {
    pub fn render(submission: &ValidatedSignup) -> FormResult<Self> {
        serde_json::to_string_pretty(submission)
            .map(Self)
            .map_err(|error| FormError::SubmitFailed(error.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compact JSON, mostly useful for logs and assertions.
pub fn to_compact_json(submission: &ValidatedSignup) -> FormResult<String> {
    serde_json::to_string(submission).map_err(|error| FormError::SubmitFailed(error.to_string()))
}
