//! Attachment types and data structures.

use caseline_shared::{AlertId, AttachmentId, CaseId, Owner, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discriminated attachment content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AttachmentKind {
    /// Free-text comment left on the case.
    Comment {
        /// Comment body.
        comment: String,
    },
    /// Link between the case and one or more alert documents.
    ///
    /// `alert_ids` and `alert_indices` are parallel lists: the alert at
    /// position `n` lives in the index at position `n`.
    AlertLink {
        /// Linked alert document IDs.
        alert_ids: Vec<AlertId>,
        /// Backing index of each alert, positionally matched.
        alert_indices: Vec<String>,
    },
    /// Any other attachment payload, kept opaque.
    External {
        /// Type-specific payload.
        payload: serde_json::Value,
    },
}

/// Persisted attachment attributes, snapshotted into audit entries on delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentAttributes {
    /// Tenant/space the attachment belongs to.
    pub owner: Owner,
    /// Discriminated content.
    pub kind: AttachmentKind,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AttachmentAttributes {
    /// Returns `true` if this attachment links alerts to its case.
    #[must_use]
    pub const fn is_alert_link(&self) -> bool {
        matches!(self.kind, AttachmentKind::AlertLink { .. })
    }

    /// Derives the alert records referenced by this attachment.
    ///
    /// Returns an empty list for non-alert kinds. The parallel id/index
    /// lists are zipped; a surplus entry on either side is dropped.
    #[must_use]
    pub fn alert_info(&self) -> Vec<AlertInfo> {
        match &self.kind {
            AttachmentKind::AlertLink {
                alert_ids,
                alert_indices,
            } => alert_ids
                .iter()
                .zip(alert_indices)
                .map(|(id, index)| AlertInfo {
                    id: id.clone(),
                    index: index.clone(),
                })
                .collect(),
            AttachmentKind::Comment { .. } | AttachmentKind::External { .. } => Vec::new(),
        }
    }
}

/// Entity kinds an attachment may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// The owning case.
    Case,
    /// An alert document.
    Alert,
}

/// Typed back-reference stored on an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    /// Kind of the referenced entity.
    pub kind: ReferenceKind,
    /// Identifier of the referenced entity.
    pub id: String,
}

impl EntityReference {
    /// Creates a case back-reference.
    #[must_use]
    pub fn case(case_id: &CaseId) -> Self {
        Self {
            kind: ReferenceKind::Case,
            id: case_id.as_str().to_owned(),
        }
    }
}

/// A stored attachment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier.
    pub id: AttachmentId,
    /// Typed back-references, including the owning case.
    pub references: Vec<EntityReference>,
    /// Persisted attributes.
    pub attributes: AttachmentAttributes,
}

impl Attachment {
    /// Returns `true` if this attachment belongs to `case_id`.
    ///
    /// The first case-typed back-reference is authoritative: a missing case
    /// reference, or one pointing at a different case, means the attachment
    /// is not valid for deletion under `case_id`.
    #[must_use]
    pub fn belongs_to(&self, case_id: &CaseId) -> bool {
        self.references
            .iter()
            .find(|r| r.kind == ReferenceKind::Case)
            .is_some_and(|r| r.id == case_id.as_str())
    }
}

/// Result of fetching a case's attachments from the store.
#[derive(Debug, Clone)]
pub struct CaseAttachments {
    /// The fetched attachment records.
    pub attachments: Vec<Attachment>,
    /// Total number of attachments the case owns.
    pub total: usize,
}

/// An alert referenced by an alert-link attachment. Derived on demand,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertInfo {
    /// Alert document ID.
    pub id: AlertId,
    /// Index holding the alert document.
    pub index: String,
}

/// Snapshot of one deleted attachment inside a bulk audit batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedAttachment {
    /// Identifier of the deleted attachment.
    pub id: AttachmentId,
    /// Tenant/space it belonged to.
    pub owner: Owner,
    /// Attribute snapshot taken before deletion.
    pub attributes: AttachmentAttributes,
}

/// Audit batch covering one bulk deletion operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkDeletionRecord {
    /// The case the attachments were deleted from.
    pub case_id: CaseId,
    /// Every deleted attachment, with its attribute snapshot.
    pub attachments: Vec<DeletedAttachment>,
    /// The caller the deletion is attributed to.
    pub user: User,
}

/// Audit entry covering one single-attachment deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletionRecord {
    /// The case the attachment was deleted from.
    pub case_id: CaseId,
    /// Identifier of the deleted attachment.
    pub attachment_id: AttachmentId,
    /// Tenant/space it belonged to.
    pub owner: Owner,
    /// Attribute snapshot taken before deletion.
    pub attributes: AttachmentAttributes,
    /// The caller the deletion is attributed to.
    pub user: User,
}
