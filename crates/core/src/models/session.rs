use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of the HR user who owns a slot set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns `None` for blank input, which is treated as "no user".
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity established at sign-in and dropped at sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl SignInResponse {
    pub fn into_session(self) -> Option<Session> {
        Some(Session {
            user_id: UserId::new(&self.user_id)?,
            token: self.token,
        })
    }
}
