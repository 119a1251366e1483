pub use crate::form::{
    FieldArray, FieldKey, FieldLens, FormController, FormError, FormModel, FormOptions,
    FormResult, FormSnapshot, Resolver, RevalidateMode, RowId, SubmitState, ValidationError,
    ValidationMode,
};
pub use crate::page::{EditorState, InputKind, SignupView};
#[cfg(feature = "app")]
pub use crate::page::{SignupPage, TextField, TextFieldEvent};
pub use crate::signup::{
    SignupController, SignupDraft, SignupIssue, SignupSchema, SubmissionPreview, TechEntryDraft,
    ValidatedSignup, ValidatedTech, signup_controller,
};
