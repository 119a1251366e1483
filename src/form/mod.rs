mod controller;
mod field_array;
mod validation;


pub use controller::{
    FieldKey, FieldMeta, FormController, FormError, FormId, FormOptions, FormResult, FormSnapshot,
    RevalidateMode, SubmitState, ValidationMode,
};
pub use field_array::{FieldArray, Row, RowId};
pub use techform_form_derive::FormModel;
pub use validation::{FieldErrors, FieldLens, FormModel, Resolver, ValidationError};
