//! Caller identity attached to audit entries.

use serde::{Deserialize, Serialize};

/// The authenticated user performing an operation.
///
/// Captured once per request by the calling layer and recorded verbatim on
/// every audit entry the operation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name of the caller.
    pub username: String,
    /// Display name, when the identity provider supplies one.
    pub full_name: Option<String>,
    /// Email address, when the identity provider supplies one.
    pub email: Option<String>,
}

impl User {
    /// Creates a user from a bare username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: None,
            email: None,
        }
    }
}
