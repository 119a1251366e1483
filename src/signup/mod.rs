//! The signup form: its draft model, the schema that validates it and the
//! JSON preview produced from an accepted submission.

mod draft;
mod issue;
pub mod rules;
mod schema;
mod submission;
mod validated;


pub use draft::{
    DEFAULT_KNOWLEDGE, SignupDraft, SignupDraftEmailLens, SignupDraftFields, SignupDraftNameLens,
    SignupDraftPasswordLens, SignupDraftTechsLens, TechEntryDraft, TechEntryDraftFields,
    TechEntryDraftKnowledgeLens, TechEntryDraftTitleLens,
};
pub use issue::SignupIssue;
pub use schema::SignupSchema;
pub use submission::{SubmissionPreview, to_compact_json};
pub use validated::{Knowledge, ValidatedSignup, ValidatedTech};

use crate::form::{FormController, FormOptions};

pub type SignupController = FormController<SignupDraft, SignupSchema>;

/// Controller for an empty signup draft with the default validation modes:
/// errors appear on submit and are refreshed on every change afterwards.
pub fn signup_controller() -> SignupController {
    FormController::new(SignupDraft::default(), SignupSchema, FormOptions::default())
}
