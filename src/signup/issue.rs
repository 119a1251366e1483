use std::fmt::{Display, Formatter};

use crate::form::ValidationError;

/// Every way a signup draft can be rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SignupIssue {
    NameRequired,
    EmailRequired,
    EmailInvalid,
    EmailDomain,
    PasswordTooShort,
    TitleRequired,
    KnowledgeNotANumber,
    KnowledgeTooLow,
    KnowledgeTooHigh,
    TooFewTechs,
}

impl SignupIssue {
    pub const fn as_str(self) -> &'static str {
        match self {
            SignupIssue::NameRequired => "O Nome é obrigatório",
            SignupIssue::EmailRequired => "O E-mail é obrigatório",
            SignupIssue::EmailInvalid => "Formato de E-mail inválido",
            SignupIssue::EmailDomain => "O e-mail precisa ser da Click IP",
            SignupIssue::PasswordTooShort => "A senha precisa ter no mínimo 6 caracteres",
            SignupIssue::TitleRequired => "O título é obrigatório",
            SignupIssue::KnowledgeNotANumber => "O conhecimento precisa ser um número",
            SignupIssue::KnowledgeTooLow => "O conhecimento deve ser no mínimo 1",
            SignupIssue::KnowledgeTooHigh => "O conhecimento deve ser no máximo 100",
            SignupIssue::TooFewTechs => "Insira pelo menos duas tecnologias",
        }
    }
}

impl Display for SignupIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError for SignupIssue {
    fn message(&self) -> String {
        self.as_str().to_string()
    }
}
