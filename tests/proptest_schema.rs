//! Property tests for the signup schema rules.

use proptest::prelude::*;
use techform::form::{FieldArray, FieldKey, Resolver};
use techform::signup::{SignupDraft, SignupIssue, SignupSchema, TechEntryDraft, rules};

fn valid_draft(techs: Vec<TechEntryDraft>) -> SignupDraft {
    SignupDraft {
        name: "ana".into(),
        email: "ana@clickip.com.br".into(),
        password: "123456".into(),
        techs: FieldArray::from_values(techs),
    }
}

fn errors_at(draft: &SignupDraft, key: &str) -> Vec<SignupIssue> {
    match SignupSchema.resolve(draft) {
        Ok(_) => Vec::new(),
        Err(errors) => errors
            .get(&FieldKey::from(key.to_string()))
            .cloned()
            .unwrap_or_default(),
    }
}

fn arb_name() -> impl Strategy<Value = String> {
    let word = "[a-zçãéíóú]{1,8}";
    prop::string::string_regex(&format!("[ ]{{0,3}}{word}( {word}){{0,2}}[ ]{{0,3}}")).unwrap()
}

fn arb_foreign_email() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9]{1,10}@[a-z]{2,8}\\.(com|net|org|io)").unwrap()
}

fn arb_valid_tech() -> impl Strategy<Value = TechEntryDraft> {
    ("[A-Za-z]{1,8}", 1u32..=100).prop_map(|(title, knowledge)| {
        TechEntryDraft::new(title, knowledge.to_string())
    })
}

fn arb_out_of_range() -> impl Strategy<Value = i64> {
    prop_oneof![-1000i64..1, 101i64..1000]
}

proptest! {
    #[test]
    fn names_are_trimmed_and_capitalized(raw in arb_name()) {
        let name = rules::name(&raw).unwrap();
        prop_assert_eq!(name.trim(), name.as_str());
        for word in name.split(' ') {
            let first = word.chars().next().unwrap();
            prop_assert_eq!(first.to_uppercase().next(), Some(first));
        }
    }

    #[test]
    fn foreign_domains_are_rejected(email in arb_foreign_email()) {
        prop_assert_eq!(rules::email(&email), Err(vec![SignupIssue::EmailDomain]));
    }

    #[test]
    fn domain_check_ignores_case(local in "[a-z]{1,10}", upper in any::<bool>()) {
        let email = if upper {
            format!("{}@CLICKIP.COM.BR", local.to_uppercase())
        } else {
            format!("{local}@clickip.com.br")
        };
        prop_assert_eq!(rules::email(&email), Ok(format!("{local}@clickip.com.br")));
    }

    #[test]
    fn short_passwords_fail(password in ".{0,5}") {
        prop_assert_eq!(rules::password(&password), Err(vec![SignupIssue::PasswordTooShort]));
    }

    #[test]
    fn long_enough_passwords_pass(password in ".{6,24}") {
        prop_assert_eq!(rules::password(&password), Ok(password.clone()));
    }

    #[test]
    fn short_lists_fail_even_when_rows_are_valid(
        techs in prop::collection::vec(arb_valid_tech(), 0..2),
    ) {
        let draft = valid_draft(techs);
        prop_assert_eq!(errors_at(&draft, "techs"), vec![SignupIssue::TooFewTechs]);
    }

    #[test]
    fn out_of_range_knowledge_fails_its_row(
        knowledge in arb_out_of_range(),
        extra in prop::collection::vec(arb_valid_tech(), 0..3),
    ) {
        let mut techs = vec![TechEntryDraft::new("Go", knowledge.to_string())];
        techs.extend(extra);
        let expected = if knowledge < 1 {
            SignupIssue::KnowledgeTooLow
        } else {
            SignupIssue::KnowledgeTooHigh
        };

        let draft = valid_draft(techs);
        prop_assert_eq!(errors_at(&draft, "techs.0.knowledge"), vec![expected]);
        prop_assert!(errors_at(&draft, "techs.0.title").is_empty());
    }

    #[test]
    fn non_numeric_knowledge_fails_its_row(knowledge in "[g-zG-Z]{1,6}") {
        let draft = valid_draft(vec![
            TechEntryDraft::new("Go", "80"),
            TechEntryDraft::new("Rust", knowledge),
        ]);
        prop_assert_eq!(
            errors_at(&draft, "techs.1.knowledge"),
            vec![SignupIssue::KnowledgeNotANumber]
        );
        prop_assert!(errors_at(&draft, "techs").is_empty());
    }
}
