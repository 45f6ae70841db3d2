use std::{borrow::Cow, fmt};

use derive_more::Constructor;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

mod rules;

/// A sign-up form as posted by the client.
///
/// Absent and `null` fields deserialize to the empty string, so they are reported by the
/// field's "required" rule instead of failing the JSON layer.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUp {
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone_number: String,
    #[serde(deserialize_with = "nullable")]
    pub password: String,
    #[serde(deserialize_with = "nullable")]
    pub confirm_password: String,
}

/// A failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Constructor)]
pub struct Violation {
    /// The wire name of the field, e.g. `phoneNumber`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(Vec<Violation>),
}

impl SignUp {
    /// Runs the rules of every field, in field order.
    ///
    /// Each field reports at most one violation: the first of its rules that fails. Fields
    /// are independent of each other, except that `confirmPassword` is compared against the
    /// raw `password`.
    pub fn violations(&self) -> Vec<Violation> {
        rules::FIELDS
            .iter()
            .filter_map(|field| {
                field
                    .first_failure(self)
                    .map(|rule| Violation::new(field.name.into(), rule.message.into()))
            })
            .collect()
    }

    pub fn verdict(&self) -> Verdict {
        let violations = self.violations();
        if violations.is_empty() {
            Verdict::Valid
        } else {
            Verdict::Invalid(violations)
        }
    }
}

impl Validate for SignUp {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in rules::FIELDS.iter() {
            if let Some(rule) = field.first_failure(self) {
                let mut error = ValidationError::new(rule.code);
                error.message = Some(Cow::Borrowed(rule.message));
                errors.add(field.name, error);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// Passwords must never end up in logs.
impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"[redacted]")
            .field("confirm_password", &"[redacted]")
            .finish()
    }
}

fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
