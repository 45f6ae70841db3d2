//! The field rule tables. Rules of a field run in order and the first failing one is reported.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::SignUp;

/// Optional `+` and country code, then 3-3-4 digit groups separated by an optional `-`, `.`,
/// or whitespace. The area code may be parenthesized.
static PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?(?:[0-9]{1,3})?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$")
        .expect("Invalid phone number pattern")
});

/// Domain part of an email address: dotted, ending in a top level domain of two or more
/// letters or a punycode label. Rules out single labels, numeric TLDs and IP literals.
static EMAIL_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^.@\[\]]+\.)+(?:\p{L}{2,}|xn--[a-zA-Z0-9-]+)$")
        .expect("Invalid email domain pattern")
});

pub(crate) struct Rule {
    /// Machine readable name, used as `validator` error code.
    pub code: &'static str,
    pub message: &'static str,
    passes: fn(&str, &SignUp) -> bool,
}

pub(crate) struct FieldRules {
    pub name: &'static str,
    trim: bool,
    value: fn(&SignUp) -> &str,
    rules: &'static [Rule],
}

impl FieldRules {
    pub fn first_failure(&self, form: &SignUp) -> Option<&'static Rule> {
        let raw = (self.value)(form);
        let value = if self.trim { raw.trim() } else { raw };
        self.rules.iter().find(|rule| !(rule.passes)(value, form))
    }
}

pub(crate) static FIELDS: [FieldRules; 5] = [
    FieldRules {
        name: "username",
        trim: true,
        value: username,
        rules: &USERNAME,
    },
    FieldRules {
        name: "email",
        trim: true,
        value: email,
        rules: &EMAIL,
    },
    FieldRules {
        name: "phoneNumber",
        trim: true,
        value: phone_number,
        rules: &PHONE,
    },
    FieldRules {
        name: "password",
        trim: false,
        value: password,
        rules: &PASSWORD,
    },
    FieldRules {
        name: "confirmPassword",
        trim: false,
        value: confirm_password,
        rules: &CONFIRM_PASSWORD,
    },
];

static USERNAME: [Rule; 3] = [
    Rule {
        code: "required",
        message: "Username is required.",
        passes: not_empty,
    },
    Rule {
        code: "length",
        message: "Username must be between 3 and 20 characters.",
        passes: |value, _| (3..=20).contains(&value.chars().count()),
    },
    Rule {
        code: "charset",
        message: "Username contains invalid characters (only alphanumeric, _, - allowed).",
        passes: |value, _| {
            value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        },
    },
];

static EMAIL: [Rule; 3] = [
    Rule {
        code: "required",
        message: "Email is required.",
        passes: not_empty,
    },
    Rule {
        code: "email",
        message: "Please enter a valid email address.",
        passes: |value, _| email_address(value),
    },
    Rule {
        code: "length",
        message: "Email address is too long.",
        passes: |value, _| value.chars().count() <= 255,
    },
];

static PHONE: [Rule; 3] = [
    Rule {
        code: "required",
        message: "Phone number is required.",
        passes: not_empty,
    },
    Rule {
        code: "pattern",
        message: "Please enter a valid phone number format (e.g., 123-456-7890).",
        passes: |value, _| PHONE_NUMBER.is_match(value),
    },
    // Separators count towards the length.
    Rule {
        code: "length",
        message: "Phone number length is invalid.",
        passes: |value, _| (10..=15).contains(&value.chars().count()),
    },
];

static PASSWORD: [Rule; 6] = [
    Rule {
        code: "required",
        message: "Password is required.",
        passes: not_empty,
    },
    Rule {
        code: "length",
        message: "Password must be at least 8 characters long.",
        passes: |value, _| value.chars().count() >= 8,
    },
    Rule {
        code: "uppercase",
        message: "Password must contain at least one uppercase letter.",
        passes: |value, _| value.chars().any(|c| c.is_ascii_uppercase()),
    },
    Rule {
        code: "lowercase",
        message: "Password must contain at least one lowercase letter.",
        passes: |value, _| value.chars().any(|c| c.is_ascii_lowercase()),
    },
    Rule {
        code: "digit",
        message: "Password must contain at least one number.",
        passes: |value, _| value.chars().any(|c| c.is_ascii_digit()),
    },
    Rule {
        code: "special",
        message: "Password must contain at least one special character.",
        passes: |value, _| value.chars().any(|c| !c.is_ascii_alphanumeric()),
    },
];

static CONFIRM_PASSWORD: [Rule; 2] = [
    Rule {
        code: "required",
        message: "Confirm Password is required.",
        passes: not_empty,
    },
    Rule {
        code: "match",
        message: "Passwords do not match.",
        passes: |value, form| value == form.password,
    },
];

fn not_empty(value: &str, _: &SignUp) -> bool {
    !value.is_empty()
}

fn email_address(value: &str) -> bool {
    value.validate_email()
        && value
            .rsplit_once('@')
            .is_some_and(|(_, domain)| EMAIL_DOMAIN.is_match(domain))
}

fn username(form: &SignUp) -> &str {
    &form.username
}

fn email(form: &SignUp) -> &str {
    &form.email
}

fn phone_number(form: &SignUp) -> &str {
    &form.phone_number
}

fn password(form: &SignUp) -> &str {
    &form.password
}

fn confirm_password(form: &SignUp) -> &str {
    &form.confirm_password
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn failure(name: &str, value: &str) -> Option<&'static str> {
        let mut form = SignUp::default();
        match name {
            "username" => form.username = value.into(),
            "email" => form.email = value.into(),
            "phoneNumber" => form.phone_number = value.into(),
            "password" => form.password = value.into(),
            _ => unreachable!(),
        }
        FIELDS
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.first_failure(&form))
            .map(|rule| rule.code)
    }

    #[rstest]
    #[case("valid_user", None)]
    #[case("  valid-user  ", None)]
    #[case("abc", None)]
    #[case("a2345678901234567890", None)]
    #[case("", Some("required"))]
    #[case("    ", Some("required"))]
    #[case("ab", Some("length"))]
    #[case("a23456789012345678901", Some("length"))]
    #[case("bad user", Some("charset"))]
    #[case("user!", Some("charset"))]
    #[case("jürgen", Some("charset"))]
    fn username_rules(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(failure("username", value), expected);
    }

    #[rstest]
    #[case("user@example.com", None)]
    #[case(" user@example.com ", None)]
    #[case("", Some("required"))]
    #[case("not-an-email", Some("email"))]
    #[case("user@", Some("email"))]
    #[case("user@mail.example.co.uk", None)]
    #[case("user@xn--80ak6aa92e.com", None)]
    #[case("user@example.xn--p1ai", None)]
    #[case("user@localhost", Some("email"))]
    #[case("a@b.c", Some("email"))]
    #[case("user@[127.0.0.1]", Some("email"))]
    #[case("a@b.123", Some("email"))]
    fn email_rules(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(failure("email", value), expected);
    }

    #[test]
    fn overlong_email_fails_somewhere() {
        // The email check already rejects addresses above 254 chars.
        let email = format!("{}@{}.com", "a".repeat(64), "b".repeat(200));
        assert!(failure("email", &email).is_some());
    }

    #[rstest]
    #[case("123-456-7890", None)]
    #[case("123.456.7890", None)]
    #[case("123 456 7890", None)]
    #[case("1234567890", None)]
    #[case("(123) 456-7890", None)]
    #[case("+1 555-123-4567", None)]
    #[case("+44 5551234567", None)]
    #[case("+1 123-456-7890", None)]
    #[case("  123-456-7890  ", None)]
    #[case("", Some("required"))]
    #[case("555-1234", Some("pattern"))]
    #[case("123-456-789a", Some("pattern"))]
    #[case("+1 (555) 123-4567", Some("length"))]
    #[case("+123-456-789-0123", Some("length"))]
    #[case("+12 123-456-7890", Some("length"))]
    fn phone_rules(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(failure("phoneNumber", value), expected);
    }

    #[rstest]
    #[case("Abcdef1!", None)]
    #[case("", Some("required"))]
    #[case("Ab1!", Some("length"))]
    #[case("weakpass", Some("uppercase"))]
    #[case("ABCDEF1!", Some("lowercase"))]
    #[case("Abcdefg!", Some("digit"))]
    #[case("Abcdefg1", Some("special"))]
    #[case("Abcdef1 ", None)]
    fn password_rules(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(failure("password", value), expected);
    }

    #[test]
    fn passwords_are_not_trimmed() {
        assert_eq!(failure("password", "        "), Some("uppercase"));
    }
}
