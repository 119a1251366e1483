//! Signup form with a dynamic list of technologies.
//!
//! [`form`] holds the generic form engine (controller, lenses, field
//! arrays and resolvers), [`signup`] the signup schema and its JSON
//! preview, and [`page`] the presentation built on top of them.

pub mod form;
pub mod page;
pub mod prelude;
pub mod signup;

pub use form::{FormController, FormError, FormOptions, FormResult};
pub use signup::{SignupController, SignupDraft, SignupSchema, signup_controller};
