//! Per-field checks and transforms. Each rule returns the transformed value
//! or every issue it found, in reporting order.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::issue::SignupIssue;

pub const EMAIL_DOMAIN: &str = "@clickip.com.br";
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_TECHS: usize = 2;
pub const KNOWLEDGE_MIN: Decimal = Decimal::ONE;
pub const KNOWLEDGE_MAX: Decimal = Decimal::ONE_HUNDRED;

pub type Checked<T> = Result<T, Vec<SignupIssue>>;

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .ok()
});

/// Decimal or scientific notation: sign, integer digits, fraction digits,
/// exponent. At least one of the digit groups must be present.
static NUMBER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?$").ok()
});

/// Significant digits kept when coercing; `Decimal` holds 28 fractional
/// digits at most.
const MAX_SCALE: i64 = 28;

/// Result of reading a number input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coerced {
    Number(Decimal),
    /// Well-formed, but larger in magnitude than `Decimal` can hold.
    Overflow { negative: bool },
}

pub fn name(value: &str) -> Checked<String> {
    if value.trim().is_empty() {
        return Err(vec![SignupIssue::NameRequired]);
    }
    Ok(title_case(value))
}

pub fn email(value: &str) -> Checked<String> {
    let mut issues = Vec::new();
    if value.is_empty() {
        issues.push(SignupIssue::EmailRequired);
    }
    if !is_email(value) {
        issues.push(SignupIssue::EmailInvalid);
    }
    if !issues.is_empty() {
        return Err(issues);
    }

    let lowered = value.to_lowercase();
    if !lowered.ends_with(EMAIL_DOMAIN) {
        return Err(vec![SignupIssue::EmailDomain]);
    }
    Ok(lowered)
}

pub fn password(value: &str) -> Checked<String> {
    if value.chars().count() < MIN_PASSWORD_CHARS {
        return Err(vec![SignupIssue::PasswordTooShort]);
    }
    Ok(value.to_string())
}

pub fn title(value: &str) -> Checked<String> {
    if value.is_empty() {
        return Err(vec![SignupIssue::TitleRequired]);
    }
    Ok(value.to_string())
}

pub fn knowledge(value: &str) -> Checked<Decimal> {
    let number = match coerce_number(value) {
        Some(Coerced::Number(number)) => number,
        Some(Coerced::Overflow { negative: true }) => {
            return Err(vec![SignupIssue::KnowledgeTooLow]);
        }
        Some(Coerced::Overflow { negative: false }) => {
            return Err(vec![SignupIssue::KnowledgeTooHigh]);
        }
        None => return Err(vec![SignupIssue::KnowledgeNotANumber]),
    };
    let mut issues = Vec::new();
    if number < KNOWLEDGE_MIN {
        issues.push(SignupIssue::KnowledgeTooLow);
    }
    if number > KNOWLEDGE_MAX {
        issues.push(SignupIssue::KnowledgeTooHigh);
    }
    if issues.is_empty() {
        Ok(number)
    } else {
        Err(issues)
    }
}

pub fn tech_count(len: usize) -> Checked<()> {
    if len < MIN_TECHS {
        return Err(vec![SignupIssue::TooFewTechs]);
    }
    Ok(())
}

/// Trims, collapses runs of whitespace and upper-cases the first character
/// of every word. The rest of each word is kept as typed.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Number coercion of a text input: blank text is zero, decimal and
/// scientific notation are accepted, anything else is not a number.
/// Values too small for `Decimal` read as zero.
pub fn coerce_number(value: &str) -> Option<Coerced> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(Coerced::Number(Decimal::ZERO));
    }
    let captures = NUMBER_PATTERN.as_ref()?.captures(trimmed)?;
    let negative = &captures[1] == "-";
    let integer = captures.get(2).map_or("", |group| group.as_str());
    let fraction = captures.get(3).map_or("", |group| group.as_str());
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    let exponent = match captures.get(4) {
        None => 0,
        Some(group) => group.as_str().parse::<i64>().unwrap_or_else(|_| {
            if group.as_str().starts_with('-') {
                i64::MIN / 2
            } else {
                i64::MAX / 2
            }
        }),
    };

    // Value is 0.<digits> x 10^point once leading zeros are dropped.
    let all_digits = format!("{integer}{fraction}");
    let digits = all_digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(Coerced::Number(Decimal::ZERO));
    }
    let leading_zeros = (all_digits.len() - digits.len()) as i64;
    let point = (integer.len() as i64)
        .saturating_add(exponent)
        .saturating_sub(leading_zeros);
    if point > MAX_SCALE + 1 {
        return Some(Coerced::Overflow { negative });
    }
    if point < -MAX_SCALE {
        return Some(Coerced::Number(Decimal::ZERO));
    }

    let kept = usize::try_from(point + MAX_SCALE).map_or(0, |limit| limit.min(digits.len()));
    let digits = &digits[..kept];
    let magnitude = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point as usize;
        if point >= digits.len() {
            format!("{digits}{}", "0".repeat(point - digits.len()))
        } else {
            format!("{}.{}", &digits[..point], &digits[point..])
        }
    };
    let sign = if negative { "-" } else { "" };
    match Decimal::from_str(&format!("{sign}{magnitude}")) {
        Ok(number) => Some(Coerced::Number(number)),
        Err(_) if point > 0 => Some(Coerced::Overflow { negative }),
        Err(_) => Some(Coerced::Number(Decimal::ZERO)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_trims_and_capitalizes_each_word() {
        assert_eq!(title_case("  joão silva "), "João Silva");
        assert_eq!(title_case("ana   souza"), "Ana Souza");
        assert_eq!(title_case("mARIA"), "MARIA");
        assert_eq!(title_case("élise"), "Élise");
    }

    #[test]
    fn blank_name_is_required() {
        assert_eq!(name(""), Err(vec![SignupIssue::NameRequired]));
        assert_eq!(name("   "), Err(vec![SignupIssue::NameRequired]));
    }

    #[test]
    fn email_syntax() {
        assert!(is_email("ana@clickip.com.br"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email("ana"));
        assert!(!is_email("ana@"));
        assert!(!is_email("@clickip.com.br"));
        assert!(!is_email(".ana@clickip.com.br"));
        assert!(!is_email("ana..b@clickip.com.br"));
        assert!(!is_email("ana.@clickip.com.br"));
        assert!(!is_email("ana@clickip"));
        assert!(!is_email("ana@clickip.c"));
    }

    #[test]
    fn email_letters_are_ascii_only() {
        assert!(!is_email("\u{212A}@clickip.com.br"));
        assert!(!is_email("\u{17F}ara@clickip.com.br"));
        assert_eq!(email("\u{212A}@clickip.com.br"), Err(vec![SignupIssue::EmailInvalid]));
    }

    #[test]
    fn empty_email_reports_required_before_format() {
        assert_eq!(
            email(""),
            Err(vec![SignupIssue::EmailRequired, SignupIssue::EmailInvalid])
        );
    }

    #[test]
    fn email_domain_is_checked_after_lowercasing() {
        assert_eq!(email("ANA@CLICKIP.COM.BR").as_deref(), Ok("ana@clickip.com.br"));
        assert_eq!(email("ana@gmail.com"), Err(vec![SignupIssue::EmailDomain]));
        assert_eq!(email("not-an-email"), Err(vec![SignupIssue::EmailInvalid]));
    }

    #[test]
    fn password_counts_characters() {
        assert_eq!(password("12345"), Err(vec![SignupIssue::PasswordTooShort]));
        assert_eq!(password("123456").as_deref(), Ok("123456"));
        assert_eq!(password("çãõéíú").as_deref(), Ok("çãõéíú"));
    }

    #[test]
    fn knowledge_coercion_and_bounds() {
        assert_eq!(knowledge("80"), Ok(Decimal::from(80)));
        assert_eq!(knowledge(" 1 "), Ok(Decimal::ONE));
        assert_eq!(knowledge("100"), Ok(Decimal::ONE_HUNDRED));
        assert_eq!(knowledge("1e2"), Ok(Decimal::ONE_HUNDRED));
        assert_eq!(knowledge("0"), Err(vec![SignupIssue::KnowledgeTooLow]));
        assert_eq!(knowledge(""), Err(vec![SignupIssue::KnowledgeTooLow]));
        assert_eq!(knowledge("100.5"), Err(vec![SignupIssue::KnowledgeTooHigh]));
        assert_eq!(knowledge("abc"), Err(vec![SignupIssue::KnowledgeNotANumber]));
        assert_eq!(knowledge("+.5e2"), Ok(Decimal::from(50)));
        assert_eq!(knowledge("12.5"), Ok(Decimal::new(125, 1)));
        assert_eq!(knowledge("5."), Ok(Decimal::from(5)));
        assert_eq!(knowledge("0.0001e4"), Ok(Decimal::ONE));
    }

    #[test]
    fn knowledge_rejects_text_outside_number_grammar() {
        let rejected = [
            "5_0", "1_0_0", "0x10", "Infinity", "NaN", ".", "e5", "1e", "1.2.3", "٥٠",
        ];
        for text in rejected {
            assert_eq!(
                knowledge(text),
                Err(vec![SignupIssue::KnowledgeNotANumber]),
                "{text}"
            );
        }
    }

    #[test]
    fn knowledge_beyond_decimal_range_reports_bounds() {
        assert_eq!(knowledge("1e400"), Err(vec![SignupIssue::KnowledgeTooHigh]));
        assert_eq!(
            knowledge("99999999999999999999999999999"),
            Err(vec![SignupIssue::KnowledgeTooHigh])
        );
        assert_eq!(knowledge("-1e400"), Err(vec![SignupIssue::KnowledgeTooLow]));
        assert_eq!(knowledge("1e-400"), Err(vec![SignupIssue::KnowledgeTooLow]));
        assert_eq!(
            knowledge("1e99999999999999999999"),
            Err(vec![SignupIssue::KnowledgeTooHigh])
        );
        assert_eq!(coerce_number("0e400"), Some(Coerced::Number(Decimal::ZERO)));
    }

    #[test]
    fn tech_count_needs_two() {
        assert_eq!(tech_count(0), Err(vec![SignupIssue::TooFewTechs]));
        assert_eq!(tech_count(1), Err(vec![SignupIssue::TooFewTechs]));
        assert_eq!(tech_count(2), Ok(()));
    }
}
