use techform::form::{FieldArray, FieldLens, FormModel};

#[derive(Clone, Default, techform::form::FormModel)]
struct ContactForm {
    email: String,
    phones: FieldArray<String>,
}

fn main() {
    let fields = ContactForm::fields();
    let lens = fields.email();
    let mut model = ContactForm::default();
    lens.set(&mut model, "ana@clickip.com.br".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.get(&model), "ana@clickip.com.br");
    assert_eq!(fields.phones().key().as_str(), "phones");
    let _: ContactFormFields = ContactForm::fields();
}
