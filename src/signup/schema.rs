use crate::form::{FieldErrors, FieldKey, FieldLens, FormModel, Resolver};

use super::draft::{SignupDraft, TechEntryDraft};
use super::issue::SignupIssue;
use super::rules::{self, Checked};
use super::validated::{ValidatedSignup, ValidatedTech};

/// Declarative rules of the signup form, plugged into the form controller
/// as its resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignupSchema;

impl Resolver<SignupDraft> for SignupSchema {
    type Output = ValidatedSignup;
    type Error = SignupIssue;

    fn resolve(&self, draft: &SignupDraft) -> Result<ValidatedSignup, FieldErrors<SignupIssue>> {
        let fields = SignupDraft::fields();
        let mut errors = FieldErrors::new();

        let name = record(&mut errors, fields.name().key(), rules::name(&draft.name));
        let email = record(&mut errors, fields.email().key(), rules::email(&draft.email));
        let password = record(
            &mut errors,
            fields.password().key(),
            rules::password(&draft.password),
        );
        let techs = resolve_techs(draft, &mut errors);

        match (name, email, password, techs) {
            (Some(name), Some(email), Some(password), Some(techs)) if errors.is_empty() => {
                Ok(ValidatedSignup {
                    name,
                    email,
                    password,
                    techs,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Per-row issues are reported together with the collection-level length
/// issue, so a short list of invalid rows surfaces both.
fn resolve_techs(
    draft: &SignupDraft,
    errors: &mut FieldErrors<SignupIssue>,
) -> Option<Vec<ValidatedTech>> {
    let techs_key = SignupDraft::fields().techs().key();
    let row_fields = TechEntryDraft::fields();

    let mut resolved = Vec::with_capacity(draft.techs.len());
    let mut rows_valid = true;
    for (index, entry) in draft.techs.values().enumerate() {
        let row_key = techs_key.index(index);
        let title = record(
            errors,
            row_key.join(&row_fields.title().key()),
            rules::title(&entry.title),
        );
        let knowledge = record(
            errors,
            row_key.join(&row_fields.knowledge().key()),
            rules::knowledge(&entry.knowledge),
        );
        match (title, knowledge) {
            (Some(title), Some(knowledge)) => resolved.push(ValidatedTech {
                title,
                knowledge: knowledge.into(),
            }),
            _ => rows_valid = false,
        }
    }

    let count = record(errors, techs_key, rules::tech_count(draft.techs.len()));
    (rows_valid && count.is_some()).then_some(resolved)
}

fn record<T>(
    errors: &mut FieldErrors<SignupIssue>,
    key: FieldKey,
    checked: Checked<T>,
) -> Option<T> {
    match checked {
        Ok(value) => Some(value),
        Err(issues) => {
            errors.entry(key).or_default().extend(issues);
            None
        }
    }
}
