use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Instant;

// Contact form fields, as read from the page
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

// One of the three contact form inputs
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    // element id on the page
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// Submission attempt - field values captured at submit time
#[derive(Clone, Debug)]
pub struct SubmissionAttempt {
    pub fields: FormFields,
    pub timestamp: Instant,
}

impl SubmissionAttempt {
    pub fn new(fields: FormFields, timestamp: Instant) -> Self {
        Self { fields, timestamp }
    }

    // Short hash of the field values, used in logs instead of the raw text
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.fields.name);
        hasher.update([0u8]);
        hasher.update(&self.fields.email);
        hasher.update([0u8]);
        hasher.update(&self.fields.message);
        let digest = format!("{:x}", hasher.finalize());
        digest[..12].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_field_sensitive() {
        let now = Instant::now();
        let fields = FormFields {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            message: "Hello there".into(),
        };
        let a = SubmissionAttempt::new(fields.clone(), now);
        let b = SubmissionAttempt::new(fields.clone(), now);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 12);

        // moving text between fields must change the hash
        let shifted = FormFields {
            name: "Joj".into(),
            email: "o@x.com".into(),
            ..fields
        };
        assert_ne!(a.fingerprint(), SubmissionAttempt::new(shifted, now).fingerprint());
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let fields: FormFields = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(fields.name, "");
        assert_eq!(fields.email, "a@b.c");
    }
}
