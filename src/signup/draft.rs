use crate::form::FieldArray;

/// Knowledge value a freshly added technology row starts with.
pub const DEFAULT_KNOWLEDGE: &str = "0";

/// Values as typed into the page, before any validation.
#[derive(Clone, Debug, Default, Eq, PartialEq, crate::form::FormModel)]
pub struct SignupDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub techs: FieldArray<TechEntryDraft>,
}

/// One technology row. `knowledge` keeps the raw text of the number input;
/// the schema coerces it.
#[derive(Clone, Debug, Eq, PartialEq, crate::form::FormModel)]
pub struct TechEntryDraft {
    pub title: String,
    pub knowledge: String,
}

impl TechEntryDraft {
    pub fn new(title: impl Into<String>, knowledge: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            knowledge: knowledge.into(),
        }
    }
}

impl Default for TechEntryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            knowledge: DEFAULT_KNOWLEDGE.to_string(),
        }
    }
}
