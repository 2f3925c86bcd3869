// Field rules shared by the submit gatekeeper and live field feedback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GateConfig;
use crate::models::{Field, FormFields};

// A single failed field rule. The `Display` text is shown to the visitor.
#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("Name must be at least {min} characters.")]
    NameTooShort { min: usize },
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Message must be at least {min} characters.")]
    MessageTooShort { min: usize },
    #[error("Message must be no more than {max} characters.")]
    MessageTooLong { max: usize },
}

// Length limits for the three form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub name_min: usize,
    pub message_min: usize,
    pub message_max: usize,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::from(&GateConfig::default())
    }
}

impl From<&GateConfig> for FieldRules {
    fn from(config: &GateConfig) -> Self {
        Self {
            name_min: config.name_min_chars,
            message_min: config.message_min_chars,
            message_max: config.message_max_chars,
        }
    }
}

impl FieldRules {
    pub fn check_name(&self, name: &str) -> Option<FieldError> {
        (name.chars().count() < self.name_min)
            .then_some(FieldError::NameTooShort { min: self.name_min })
    }

    pub fn check_email(&self, email: &str) -> Option<FieldError> {
        (!is_valid_email(email)).then_some(FieldError::InvalidEmail)
    }

    pub fn check_message(&self, message: &str) -> Option<FieldError> {
        let len = message.chars().count();
        if len < self.message_min {
            Some(FieldError::MessageTooShort { min: self.message_min })
        } else if len > self.message_max {
            Some(FieldError::MessageTooLong { max: self.message_max })
        } else {
            None
        }
    }

    // Run the rule for a single field, as live feedback does on every change.
    pub fn check_field(&self, field: Field, value: &str) -> Option<FieldError> {
        match field {
            Field::Name => self.check_name(value),
            Field::Email => self.check_email(value),
            Field::Message => self.check_message(value),
        }
    }

    // Every rule, in name / email / message order. Empty means valid.
    pub fn validate(&self, fields: &FormFields) -> Vec<FieldError> {
        [
            self.check_name(&fields.name),
            self.check_email(&fields.email),
            self.check_message(&fields.message),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// `local@domain.tld`: no whitespace, exactly one `@`, and a `.` in the
// domain with text on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("jo@x.com"));
        assert!(is_valid_email("first.last@mail.example.org"));

        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b@c.d"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn name_length_boundary() {
        let rules = FieldRules::default();
        assert_eq!(rules.check_name("J"), Some(FieldError::NameTooShort { min: 2 }));
        assert_eq!(rules.check_name("Jo"), None);
        // counted in characters, not bytes
        assert_eq!(rules.check_name("é"), Some(FieldError::NameTooShort { min: 2 }));
    }

    #[test]
    fn message_length_boundaries() {
        let rules = FieldRules::default();
        assert_eq!(
            rules.check_message(&"x".repeat(9)),
            Some(FieldError::MessageTooShort { min: 10 })
        );
        assert_eq!(rules.check_message(&"x".repeat(10)), None);
        assert_eq!(rules.check_message(&"x".repeat(500)), None);
        assert_eq!(
            rules.check_message(&"x".repeat(501)),
            Some(FieldError::MessageTooLong { max: 500 })
        );
    }

    #[test]
    fn errors_accumulate_in_field_order() {
        let rules = FieldRules::default();
        let errors = rules.validate(&fields("J", "nope", "short"));
        assert_eq!(
            errors,
            vec![
                FieldError::NameTooShort { min: 2 },
                FieldError::InvalidEmail,
                FieldError::MessageTooShort { min: 10 },
            ]
        );
        assert_eq!(errors[1].to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn raw_values_are_checked_without_trimming() {
        let rules = FieldRules::default();
        assert_eq!(rules.check_email(" jo@x.com"), Some(FieldError::InvalidEmail));
        assert_eq!(rules.check_email("jo@x.com "), Some(FieldError::InvalidEmail));
        // 10 characters counting the edge spaces
        assert_eq!(rules.check_message("  hi there"), None);
        assert_eq!(rules.check_message(&format!("hi{}", " ".repeat(8))), None);
        assert_eq!(rules.check_name(" J"), None);
    }
}
