use crate::form::{FieldKey, FieldLens, FormModel, FormResult, FormSnapshot, RowId, SubmitState};
use crate::signup::{
    SignupController, SignupDraft, SignupIssue, SubmissionPreview, TechEntryDraft,
};

use super::editor::InputKind;

pub const NAME_LABEL: &str = "Nome";
pub const EMAIL_LABEL: &str = "E-mail";
pub const PASSWORD_LABEL: &str = "Senha";
pub const TECHS_LABEL: &str = "Tecnologias";
pub const ADD_TECH_LABEL: &str = "Adicionar";
pub const SUBMIT_LABEL: &str = "Salvar";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldView {
    pub key: FieldKey,
    pub label: &'static str,
    pub kind: InputKind,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TechRowView {
    pub id: RowId,
    pub title: FieldView,
    pub knowledge: FieldView,
}

/// Everything the page draws, derived from one controller snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignupView {
    pub name: FieldView,
    pub email: FieldView,
    pub password: FieldView,
    pub techs: Vec<TechRowView>,
    pub techs_error: Option<String>,
    pub submit_state: SubmitState,
    pub preview: Option<String>,
}

impl SignupView {
    pub fn from_controller(
        controller: &SignupController,
        preview: &SubmissionPreview,
    ) -> FormResult<Self> {
        Ok(Self::from_snapshot(&controller.snapshot()?, preview))
    }

    pub fn from_snapshot(
        snapshot: &FormSnapshot<SignupDraft, SignupIssue>,
        preview: &SubmissionPreview,
    ) -> Self {
        let fields = SignupDraft::fields();
        let model = &snapshot.model;
        let scalar = |key: FieldKey, label, kind, value: &str| FieldView {
            error: snapshot.display_error(&key),
            key,
            label,
            kind,
            value: value.to_string(),
        };

        let row_fields = TechEntryDraft::fields();
        let techs_key = fields.techs().key();
        let techs = model
            .techs
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let row_key = techs_key.index(index);
                TechRowView {
                    id: row.id,
                    title: scalar(
                        row_key.join(&row_fields.title().key()),
                        TECHS_LABEL,
                        InputKind::Text,
                        &row.value.title,
                    ),
                    knowledge: scalar(
                        row_key.join(&row_fields.knowledge().key()),
                        TECHS_LABEL,
                        InputKind::Number,
                        &row.value.knowledge,
                    ),
                }
            })
            .collect();

        Self {
            name: scalar(fields.name().key(), NAME_LABEL, InputKind::Text, &model.name),
            email: scalar(
                fields.email().key(),
                EMAIL_LABEL,
                InputKind::Email,
                &model.email,
            ),
            password: scalar(
                fields.password().key(),
                PASSWORD_LABEL,
                InputKind::Password,
                &model.password,
            ),
            techs,
            techs_error: snapshot.display_error(&techs_key),
            submit_state: snapshot.submit_state,
            preview: (!preview.is_empty()).then(|| preview.as_str().to_string()),
        }
    }

    pub fn row(&self, id: RowId) -> Option<&TechRowView> {
        self.techs.iter().find(|row| row.id == id)
    }
}
