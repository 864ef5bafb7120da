//! Field-level validation for the login and signup records.
//!
//! Every rule is a pure function of the record and the [`ValidationPolicy`];
//! there is no I/O and no hidden state, so validating the same record twice
//! yields the same map.
//!
//! Values are checked exactly as they would be sent. Callers trim with
//! `Credentials::normalized` / `Registration::normalized` first; padding
//! left on an email or phone number makes it invalid.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::BTreeMap;

use crate::net::types::{Credentials, Registration};

pub const DEFAULT_MIN_LENGTH: usize = 6;
pub const DEFAULT_MIN_PHONE_DIGITS: usize = 10;
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Phone number may only contain digits and a leading +";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// Field name → message, present only for invalid fields. Ordered by field
/// declaration so repeated validation compares equal.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// Tunable validation rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Minimum password length in characters (`minLength`).
    pub min_length: usize,
    /// Minimum digits in a phone number, country code included.
    pub min_phone_digits: usize,
    /// Prefix pre-filled into new phone inputs.
    pub default_country_code: String,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            min_phone_digits: DEFAULT_MIN_PHONE_DIGITS,
            default_country_code: DEFAULT_COUNTRY_CODE.to_owned(),
        }
    }
}

impl ValidationPolicy {
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }
}

/// Fields of the login form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub const ALL: &'static [Self] = &[Self::Email, Self::Password];

    /// Wire/input name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Fields of the signup form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignupField {
    Name,
    Email,
    PhoneNumber,
    Password,
}

impl SignupField {
    pub const ALL: &'static [Self] = &[Self::Name, Self::Email, Self::PhoneNumber, Self::Password];

    /// Wire/input name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Password => "password",
        }
    }
}

/// Validate a login record.
#[must_use]
pub fn validate_credentials(record: &Credentials, policy: &ValidationPolicy) -> FieldErrors<LoginField> {
    let mut errors = FieldErrors::new();
    if let Some(msg) = check_email(&record.email) {
        errors.insert(LoginField::Email, msg.to_owned());
    }
    if let Some(msg) = check_password(&record.password, policy) {
        errors.insert(LoginField::Password, msg);
    }
    errors
}

/// Validate a signup record.
#[must_use]
pub fn validate_registration(record: &Registration, policy: &ValidationPolicy) -> FieldErrors<SignupField> {
    let mut errors = FieldErrors::new();
    if record.name.trim().is_empty() {
        errors.insert(SignupField::Name, NAME_REQUIRED.to_owned());
    }
    if let Some(msg) = check_email(&record.email) {
        errors.insert(SignupField::Email, msg.to_owned());
    }
    if let Some(msg) = check_phone(&record.phone_number, policy) {
        errors.insert(SignupField::PhoneNumber, msg);
    }
    if let Some(msg) = check_password(&record.password, policy) {
        errors.insert(SignupField::Password, msg);
    }
    errors
}

/// `local@domain` with a dotted domain, no whitespace, no empty labels.
#[must_use]
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

fn check_email(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        return Some(EMAIL_REQUIRED);
    }
    if !is_email_shaped(email) {
        return Some(EMAIL_INVALID);
    }
    None
}

fn check_password(raw: &str, policy: &ValidationPolicy) -> Option<String> {
    if raw.trim().is_empty() {
        return Some(PASSWORD_REQUIRED.to_owned());
    }
    if raw.chars().count() < policy.min_length {
        return Some(format!("Password must be at least {} characters", policy.min_length));
    }
    None
}

fn check_phone(phone: &str, policy: &ValidationPolicy) -> Option<String> {
    // An untouched prefix is not an answer.
    if phone.trim().is_empty() || phone.trim() == policy.default_country_code {
        return Some(PHONE_REQUIRED.to_owned());
    }
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(PHONE_INVALID.to_owned());
    }
    if digits.len() < policy.min_phone_digits {
        return Some(format!("Phone number must have at least {} digits", policy.min_phone_digits));
    }
    None
}
