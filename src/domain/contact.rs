//! Contact form domain model and validation
//!
//! A submission arrives as an untyped JSON mapping. Each of the five fields is
//! coerced and checked independently, so a single response reports every
//! problem in the payload at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::{ValidateEmail, ValidateLength};

/// Maximum number of characters accepted for the sender's name
pub const NAME_MAX_LENGTH: u64 = 50;

/// Key used for errors that are not attached to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Wire names of the submission fields
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const SUBJECT: &str = "subject";
    pub const MESSAGE: &str = "message";
    pub const PRIVACY_POLICY_ACCEPTED: &str = "isPrivacyPolicyAccepted";
}

/// Client-facing error messages
pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const NULL: &str = "This field may not be null.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const NOT_A_STRING: &str = "Not a valid string.";
    pub const INVALID_EMAIL: &str = "Enter a valid email address.";
    pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
    pub const NOT_AN_OBJECT: &str = "Invalid data. Expected a dictionary.";
}

/// A validated contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_privacy_policy_accepted: bool,
}

/// Field name to human-readable error messages.
///
/// Serializes as a plain JSON object, e.g. `{"email": ["Enter a valid email address."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record an error message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields with at least one error
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields with errors, in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl ContactSubmission {
    /// Validate and coerce an inbound payload.
    ///
    /// All field rules run regardless of earlier failures.
    pub fn validate(payload: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let Some(map) = payload.as_object() else {
            errors.add(NON_FIELD_ERRORS, messages::NOT_AN_OBJECT);
            return Err(errors);
        };

        let name = string_field(map, fields::NAME, &mut errors).and_then(|name| {
            if name.validate_length(None, Some(NAME_MAX_LENGTH), None) {
                Some(name)
            } else {
                errors.add(
                    fields::NAME,
                    format!("Ensure this field has no more than {} characters.", NAME_MAX_LENGTH),
                );
                None
            }
        });

        let email = string_field(map, fields::EMAIL, &mut errors).and_then(|email| {
            if email.validate_email() {
                Some(email)
            } else {
                errors.add(fields::EMAIL, messages::INVALID_EMAIL);
                None
            }
        });

        let subject = string_field(map, fields::SUBJECT, &mut errors);
        let message = string_field(map, fields::MESSAGE, &mut errors);
        let accepted = boolean_field(map, fields::PRIVACY_POLICY_ACCEPTED, &mut errors);

        match (name, email, subject, message, accepted) {
            (Some(name), Some(email), Some(subject), Some(message), Some(accepted))
                if errors.is_empty() =>
            {
                Ok(Self {
                    name,
                    email,
                    subject,
                    message,
                    is_privacy_policy_accepted: accepted,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Fetch a required, non-blank string field. Surrounding whitespace is
/// trimmed and numbers are accepted as their decimal text.
fn string_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let text = match map.get(field) {
        None => {
            errors.add(field, messages::REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, messages::NULL);
            return None;
        }
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errors.add(field, messages::NOT_A_STRING);
            return None;
        }
    };

    if text.is_empty() {
        errors.add(field, messages::BLANK);
        return None;
    }
    Some(text)
}

/// Fetch a required boolean field, coercing the usual textual and numeric
/// spellings.
fn boolean_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<bool> {
    let coerced = match map.get(field) {
        None => {
            errors.add(field, messages::REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, messages::NULL);
            return None;
        }
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Some(_) => None,
    };

    if coerced.is_none() {
        errors.add(field, messages::INVALID_BOOLEAN);
    }
    coerced
}
