use techform::form::{FieldArray, FieldLens, FormModel, SubmitState};
use techform::signup::{
    SignupDraft, SubmissionPreview, TechEntryDraft, signup_controller, to_compact_json,
};

fn fill_valid(controller: &techform::SignupController) {
    let fields = SignupDraft::fields();
    let row_fields = TechEntryDraft::fields();
    controller.set(fields.name(), "ana souza".into()).unwrap();
    controller
        .set(fields.email(), "ANA@CLICKIP.COM.BR".into())
        .unwrap();
    controller.set(fields.password(), "123456".into()).unwrap();
    for (title, knowledge) in [("Go", "80"), ("Rust", "60")] {
        let row = controller
            .append(fields.techs(), TechEntryDraft::default())
            .unwrap();
        controller
            .set_row(fields.techs(), row, row_fields.title(), title.into())
            .unwrap();
        controller
            .set_row(fields.techs(), row, row_fields.knowledge(), knowledge.into())
            .unwrap();
    }
}

#[test]
fn accepted_submission_serializes_transformed_values() {
    let controller = signup_controller();
    fill_valid(&controller);

    let mut compact = None;
    let mut preview = SubmissionPreview::default();
    let valid = controller
        .submit(|submission| {
            compact = Some(to_compact_json(submission)?);
            preview = SubmissionPreview::render(submission)?;
            Ok(())
        })
        .unwrap();

    assert!(valid);
    assert_eq!(
        compact.as_deref(),
        Some(
            r#"{"name":"Ana Souza","email":"ana@clickip.com.br","password":"123456","techs":[{"title":"Go","knowledge":80},{"title":"Rust","knowledge":60}]}"#
        )
    );
    assert!(preview.as_str().starts_with("{\n  \"name\": \"Ana Souza\""));
    assert_eq!(controller.snapshot().unwrap().submit_state, SubmitState::Succeeded);
}

#[test]
fn two_appends_on_empty_list_yield_distinct_default_rows() {
    let controller = signup_controller();
    let techs = SignupDraft::fields().techs();

    let first = controller.append(techs, TechEntryDraft::default()).unwrap();
    let second = controller.append(techs, TechEntryDraft::default()).unwrap();

    let snapshot = controller.snapshot().unwrap();
    let rows = snapshot.model.techs.rows();
    assert_eq!(rows.len(), 2);
    assert_ne!(first, second);
    assert_eq!(
        rows.iter().map(|row| row.id).collect::<Vec<_>>(),
        vec![first, second]
    );
    for row in rows {
        assert_eq!(row.value.title, "");
        assert_eq!(row.value.knowledge, "0");
    }
}

#[test]
fn rejected_submission_keeps_handler_uncalled() {
    let controller = signup_controller();
    let fields = SignupDraft::fields();
    controller
        .set(
            fields.techs(),
            FieldArray::from_values([TechEntryDraft::new("Go", "80")]),
        )
        .unwrap();

    let mut called = false;
    let valid = controller
        .submit(|_| {
            called = true;
            Ok(())
        })
        .unwrap();

    assert!(!valid);
    assert!(!called);
    assert_eq!(
        controller
            .display_error(&fields.techs().key())
            .unwrap()
            .as_deref(),
        Some("Insira pelo menos duas tecnologias")
    );
}

#[test]
fn fixing_a_field_after_failed_submit_clears_its_error() {
    let controller = signup_controller();
    let fields = SignupDraft::fields();

    assert!(!controller.submit(|_| Ok(())).unwrap());
    assert!(controller.display_error(&fields.name().key()).unwrap().is_some());

    controller.set(fields.name(), "bia".into()).unwrap();
    assert_eq!(controller.display_error(&fields.name().key()).unwrap(), None);
    assert!(controller.display_error(&fields.email().key()).unwrap().is_some());
}
