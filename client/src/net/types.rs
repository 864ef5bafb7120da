//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! Request bodies mirror the server's JSON keys exactly (`phoneNumber` is
//! camelCase on the wire). The session payload is kept opaque: the client
//! stores and forwards it without imposing a schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Login form record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Copy with the email trimmed. The password is kept as typed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self { email: self.email.trim().to_owned(), password: self.password.clone() }
    }
}

/// Signup form record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    /// Full number including the country-code prefix, e.g. `"+15551234567"`.
    pub phone_number: String,
    pub password: String,
}

impl Registration {
    /// Empty registration whose phone number is pre-filled with `country_code`.
    #[must_use]
    pub fn with_country_code(country_code: &str) -> Self {
        Self { phone_number: country_code.to_owned(), ..Self::default() }
    }

    /// Copy with name, email and phone trimmed. The password is kept as typed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone_number: self.phone_number.trim().to_owned(),
            password: self.password.clone(),
        }
    }
}

/// Opaque authentication payload returned by a successful login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(serde_json::Value);

impl SessionRecord {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Read a top-level field, if the payload is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Conventional bearer token field, when the server includes one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.get("token").and_then(serde_json::Value::as_str)
    }

    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Structured error body returned alongside `status: false`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response envelope for `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: bool,
    #[serde(default)]
    pub data: Option<SessionRecord>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Response envelope for `POST /api/auth/signup`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub status: bool,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Server-supplied rejection message, if one was sent and is non-blank.
pub(crate) fn error_message(error: Option<&ApiErrorBody>) -> Option<&str> {
    error
        .and_then(|e| e.message.as_deref())
        .map(str::trim)
        .filter(|m| !m.is_empty())
}
