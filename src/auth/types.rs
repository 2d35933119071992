//! Types for authentication and user accounts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user's profile, as returned by `/users/me/`.
/// Never persisted; always re-fetched from the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user ID
    pub id: i64,

    /// The user's email address
    pub email: String,

    /// The user's role
    pub role: Role,

    /// Whether the account is active
    pub is_active: bool,
}

/// Response body of the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The access token
    pub access_token: String,

    /// The token type, always "bearer"
    pub token_type: String,
}

/// Registration payload. Doctor accounts carry a display name and a
/// specialty; patient accounts omit both fields entirely.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Email address used as the login identifier
    pub email: String,

    /// Password
    pub password: String,

    /// Requested role
    pub role: Role,

    /// Full name, doctors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Specialty, doctors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl RegisterRequest {
    /// Build a patient registration
    pub fn patient(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Role::Patient,
            name: None,
            specialty: None,
        }
    }

    /// Build a doctor registration
    pub fn doctor(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Role::Doctor,
            name: Some(name.into()),
            specialty: Some(specialty.into()),
        }
    }
}
