//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `AttachmentId` where a
//! `CaseId` is expected. Identifiers are opaque strings assigned by the
//! backing store, so the wrappers carry a `String` rather than a UUID.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around opaque string identifiers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from an existing identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id!(CaseId, "Unique identifier for a case.");
typed_id!(AttachmentId, "Unique identifier for a case attachment.");
typed_id!(AlertId, "Unique identifier for an alert document.");
typed_id!(
    Owner,
    "Tenant/space identifier used for authorization scoping."
);
