use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build from raw form input, trimming both values
    pub fn from_input(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request body. Password confirmation is checked by the server.
#[derive(Clone, Serialize)]
pub struct RegistrationPayload {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl fmt::Debug for RegistrationPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationPayload")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Response of the login endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Account role, sent on success
    #[serde(default)]
    pub role: Option<String>,
}

/// Field name to validation messages, in the order the server listed them
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Response of the register endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

impl RegisterResponse {
    /// All field messages joined with ", ", or None when there are none
    pub fn joined_errors(&self) -> Option<String> {
        let joined = self
            .errors
            .iter()
            .flat_map(|errors| errors.values())
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        (!joined.is_empty()).then_some(joined)
    }
}

/// Response of the delete-user endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteUserResponse {
    #[serde(default)]
    pub success: bool,
}

/// Opaque user identifier, as embedded in the admin table markup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id from a JS argument that was either a string or a number
    pub fn from_text_or_number(text: Option<String>, number: Option<f64>) -> Option<Self> {
        text.or_else(|| number.map(|n| n.to_string())).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the table row showing this user
    pub fn row_element_id(&self) -> String {
        format!("user-{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
