//! Attachment deletion error types.

use caseline_shared::{AttachmentId, CaseId};
use thiserror::Error;

/// Coarse error classification for programmatic inspection by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested attachment(s) do not exist, or not under this case.
    NotFound,
    /// The caller lacks the required privilege for at least one entity.
    Unauthorized,
    /// A collaborator call failed for any other reason.
    Failure,
}

/// Attachment deletion operation errors.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The case has no attachments to delete.
    #[error("no attachments found for case {0}")]
    NoAttachments(CaseId),

    /// The attachment does not exist in the store.
    #[error("attachment {0} does not exist")]
    NotFound(AttachmentId),

    /// The attachment exists but does not belong to the given case.
    #[error("attachment {attachment_id} does not exist in case {case_id}")]
    NotInCase {
        /// The attachment that was looked up.
        attachment_id: AttachmentId,
        /// The case the caller claimed it belongs to.
        case_id: CaseId,
    },

    /// The caller is not permitted to act on one or more entities.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The attachment store failed.
    #[error("store error: {0}")]
    Store(String),

    /// The audit logger failed.
    #[error("audit error: {0}")]
    Audit(String),

    /// The alerts subsystem failed.
    #[error("alerts error: {0}")]
    Alerts(String),
}

impl AttachmentError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: AttachmentId) -> Self {
        Self::NotFound(id)
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoAttachments(_) | Self::NotFound(_) | Self::NotInCase { .. } => {
                ErrorKind::NotFound
            }
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Store(_) | Self::Audit(_) | Self::Alerts(_) => ErrorKind::Failure,
        }
    }
}

/// Contextual error surfaced at an operation boundary.
///
/// Wraps the underlying [`AttachmentError`] with a message naming the case
/// (and attachment, for single deletes) while preserving the cause's
/// [`ErrorKind`] and source chain.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CaseError {
    message: String,
    kind: ErrorKind,
    #[source]
    source: AttachmentError,
}

impl CaseError {
    /// Wraps a failure of the bulk deletion operation.
    #[must_use]
    pub fn bulk(case_id: &CaseId, source: AttachmentError) -> Self {
        Self {
            message: format!("failed to delete all attachments for case {case_id}: {source}"),
            kind: source.kind(),
            source,
        }
    }

    /// Wraps a failure of the single deletion operation.
    #[must_use]
    pub fn single(case_id: &CaseId, attachment_id: &AttachmentId, source: AttachmentError) -> Self {
        Self {
            message: format!(
                "failed to delete attachment {attachment_id} for case {case_id}: {source}"
            ),
            kind: source.kind(),
            source,
        }
    }

    /// Returns the classification of the underlying failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the wrapped cause.
    #[must_use]
    pub const fn cause(&self) -> &AttachmentError {
        &self.source
    }
}
