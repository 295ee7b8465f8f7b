//! Authentication messages

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Credential pair posted to the auth endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body returned by the auth endpoint.
///
/// Deployments disagree on where the token lives, so the body is kept raw and
/// looked up in order: `token`, `access_token`, then `data.token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthResponse(pub Value);

impl AuthResponse {
    pub fn token(&self) -> Option<&str> {
        fn non_empty(v: &Value) -> Option<&str> {
            v.as_str().filter(|s| !s.is_empty())
        }

        self.0
            .get("token")
            .and_then(non_empty)
            .or_else(|| self.0.get("access_token").and_then(non_empty))
            .or_else(|| self.0.get("data").and_then(|d| d.get("token")).and_then(non_empty))
    }
}
