//! Presentation of the signup form. The view model and the editing state
//! are plain data so they can be tested without a window; the gpui views
//! are built only with the `app` feature.

mod editor;
mod view_model;

#[cfg(feature = "app")]
mod palette;
#[cfg(feature = "app")]
mod text_field;
#[cfg(feature = "app")]
mod view;

pub use editor::{EditorState, InputKind, MASK_CHAR};
#[cfg(feature = "app")]
pub use text_field::{TextField, TextFieldEvent};
#[cfg(feature = "app")]
pub use view::SignupPage;
pub use view_model::{
    ADD_TECH_LABEL, EMAIL_LABEL, FieldView, NAME_LABEL, PASSWORD_LABEL, SUBMIT_LABEL, SignupView,
    TECHS_LABEL, TechRowView,
};
