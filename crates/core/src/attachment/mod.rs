//! Attachment deletion workflow for cases.
//!
//! This module provides the business logic for removing case attachments:
//! - Bulk deletion of every attachment a case owns
//! - Single-attachment deletion with case-ownership verification
//! - Audit entries for every successful deletion
//! - Alert/case unlinking when an alert-link attachment is removed

mod error;
mod service;
mod types;

pub use error::{AttachmentError, CaseError, ErrorKind};
pub use service::{
    AlertLinkManager, AttachmentStore, AuditLogger, AuthorizationGate, DeletionService,
    Operation, OwnedEntity,
};
pub use types::{
    AlertInfo, Attachment, AttachmentAttributes, AttachmentKind, BulkDeletionRecord,
    CaseAttachments, DeletedAttachment, DeletionRecord, EntityReference, ReferenceKind,
};
