//! Attachment deletion service and collaborator contracts.
//!
//! The service orchestrates authorize-then-mutate deletion flows; the
//! collaborators it drives (store, authorization gate, audit logger, alerts
//! subsystem) are traits implemented by other crates.

use std::future::Future;
use std::sync::Arc;

use caseline_shared::{AttachmentId, CaseId, Owner, User};
use tracing::{debug, error};

use super::error::{AttachmentError, CaseError};
use super::types::{
    AlertInfo, Attachment, AttachmentAttributes, BulkDeletionRecord, CaseAttachments,
    DeletedAttachment, DeletionRecord,
};
use crate::concurrency::{MAX_CONCURRENT_OPERATIONS, try_map_bounded};

/// Operations subject to per-entity authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Delete a single attachment from a case.
    DeleteAttachment,
    /// Delete every attachment a case owns.
    BulkDeleteAttachments,
}

/// An `(owner, id)` pair submitted to the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedEntity {
    /// Tenant/space scope the entity lives in.
    pub owner: Owner,
    /// Entity identifier.
    pub id: AttachmentId,
}

/// Store trait for attachment persistence.
///
/// Implemented by the persistence layer; this crate only reads and deletes
/// records, never creates or updates them.
pub trait AttachmentStore: Send + Sync {
    /// Fetch all attachments belonging to a case.
    fn find_by_case(
        &self,
        case_id: &CaseId,
    ) -> impl Future<Output = Result<CaseAttachments, AttachmentError>> + Send;

    /// Fetch one attachment by ID.
    fn get(
        &self,
        attachment_id: &AttachmentId,
    ) -> impl Future<Output = Result<Option<Attachment>, AttachmentError>> + Send;

    /// Delete one attachment by ID.
    fn delete(
        &self,
        attachment_id: &AttachmentId,
    ) -> impl Future<Output = Result<(), AttachmentError>> + Send;
}

/// Per-entity permission check, evaluated before any mutation.
pub trait AuthorizationGate: Send + Sync {
    /// Fails with [`AttachmentError::Unauthorized`] if the caller lacks the
    /// privilege required by `operation` for any of `entities`.
    fn ensure_authorized(
        &self,
        operation: Operation,
        entities: &[OwnedEntity],
    ) -> impl Future<Output = Result<(), AttachmentError>> + Send;
}

/// Append-only recorder of user actions.
pub trait AuditLogger: Send + Sync {
    /// Records one consolidated entry for a bulk deletion.
    fn record_bulk_deletion(
        &self,
        record: BulkDeletionRecord,
    ) -> impl Future<Output = Result<(), AttachmentError>> + Send;

    /// Records one entry for a single-attachment deletion.
    fn record_deletion(
        &self,
        record: DeletionRecord,
    ) -> impl Future<Output = Result<(), AttachmentError>> + Send;
}

/// Alerts subsystem: alert authorization and alert/case unlinking.
pub trait AlertLinkManager: Send + Sync {
    /// Fails with [`AttachmentError::Unauthorized`] if the caller cannot act
    /// on the referenced alerts.
    fn ensure_alerts_authorized(
        &self,
        alerts: &[AlertInfo],
    ) -> impl Future<Output = Result<(), AttachmentError>> + Send;

    /// Removes the case association from each referenced alert.
    fn unlink_alerts_from_case(
        &self,
        alerts: &[AlertInfo],
        case_id: &CaseId,
    ) -> impl Future<Output = Result<(), AttachmentError>> + Send;
}

/// Attachment deletion workflow.
///
/// Holds the collaborators plus the caller identity for one request, so one
/// value of this type is constructed per incoming request context.
pub struct DeletionService<S, G, A, M> {
    store: Arc<S>,
    authorization: Arc<G>,
    audit: Arc<A>,
    alerts: Arc<M>,
    user: User,
}

impl<S, G, A, M> DeletionService<S, G, A, M>
where
    S: AttachmentStore,
    G: AuthorizationGate,
    A: AuditLogger,
    M: AlertLinkManager,
{
    /// Create a new deletion service for the given caller.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        authorization: Arc<G>,
        audit: Arc<A>,
        alerts: Arc<M>,
        user: User,
    ) -> Self {
        Self {
            store,
            authorization,
            audit,
            alerts,
            user,
        }
    }

    /// Delete every attachment a case owns.
    ///
    /// Fetches the full set, authorizes it as a whole, deletes with bounded
    /// parallelism, then writes one consolidated audit batch.
    ///
    /// # Errors
    ///
    /// Returns a [`CaseError`] naming the case if:
    /// - the case has no attachments (kind `NotFound`)
    /// - the caller lacks the bulk-delete privilege for any attachment's
    ///   owner (kind `Unauthorized`); no deletion happens in this case
    /// - any collaborator call fails (kind `Failure`). A partial deletion
    ///   failure stays fail-closed: no audit entry is written for the
    ///   already-deleted subset.
    pub async fn delete_all(&self, case_id: &CaseId) -> Result<(), CaseError> {
        match self.delete_all_inner(case_id).await {
            Ok(()) => {
                debug!(%case_id, "deleted all case attachments");
                Ok(())
            }
            Err(source) => {
                error!(%case_id, error = %source, "bulk attachment deletion failed");
                Err(CaseError::bulk(case_id, source))
            }
        }
    }

    async fn delete_all_inner(&self, case_id: &CaseId) -> Result<(), AttachmentError> {
        let CaseAttachments { attachments, total } = self.store.find_by_case(case_id).await?;

        if total == 0 {
            return Err(AttachmentError::NoAttachments(case_id.clone()));
        }

        let entities: Vec<OwnedEntity> = attachments
            .iter()
            .map(|attachment| OwnedEntity {
                owner: attachment.attributes.owner.clone(),
                id: attachment.id.clone(),
            })
            .collect();

        self.authorization
            .ensure_authorized(Operation::BulkDeleteAttachments, &entities)
            .await?;

        // Keep the store from being overwhelmed by unbounded fan-out.
        try_map_bounded(&attachments, MAX_CONCURRENT_OPERATIONS, |attachment| {
            self.store.delete(&attachment.id)
        })
        .await?;

        self.audit
            .record_bulk_deletion(BulkDeletionRecord {
                case_id: case_id.clone(),
                attachments: attachments
                    .into_iter()
                    .map(|attachment| DeletedAttachment {
                        id: attachment.id,
                        owner: attachment.attributes.owner.clone(),
                        attributes: attachment.attributes,
                    })
                    .collect(),
                user: self.user.clone(),
            })
            .await
    }

    /// Delete a single attachment from a case.
    ///
    /// Verifies the attachment still belongs to `case_id` before deleting,
    /// writes one audit entry, and unlinks referenced alerts when the
    /// attachment is an alert link.
    ///
    /// # Errors
    ///
    /// Returns a [`CaseError`] naming the case and attachment if:
    /// - the attachment does not exist, or its case back-reference does not
    ///   match `case_id` (kind `NotFound`)
    /// - the caller lacks the delete privilege for the attachment's owner,
    ///   or cannot act on the referenced alerts (kind `Unauthorized`)
    /// - any collaborator call fails (kind `Failure`)
    ///
    /// Alert cleanup runs after the deletion and audit entry are committed;
    /// its failure surfaces to the caller without rolling either back.
    pub async fn delete(
        &self,
        case_id: &CaseId,
        attachment_id: &AttachmentId,
    ) -> Result<(), CaseError> {
        match self.delete_inner(case_id, attachment_id).await {
            Ok(()) => {
                debug!(%case_id, %attachment_id, "deleted case attachment");
                Ok(())
            }
            Err(source) => {
                error!(%case_id, %attachment_id, error = %source, "attachment deletion failed");
                Err(CaseError::single(case_id, attachment_id, source))
            }
        }
    }

    async fn delete_inner(
        &self,
        case_id: &CaseId,
        attachment_id: &AttachmentId,
    ) -> Result<(), AttachmentError> {
        let attachment = self
            .store
            .get(attachment_id)
            .await?
            .ok_or_else(|| AttachmentError::not_found(attachment_id.clone()))?;

        let entities = [OwnedEntity {
            owner: attachment.attributes.owner.clone(),
            id: attachment.id.clone(),
        }];
        self.authorization
            .ensure_authorized(Operation::DeleteAttachment, &entities)
            .await?;

        // Guards against cross-case deletion via a stale or spoofed id.
        if !attachment.belongs_to(case_id) {
            return Err(AttachmentError::NotInCase {
                attachment_id: attachment_id.clone(),
                case_id: case_id.clone(),
            });
        }

        self.store.delete(attachment_id).await?;

        self.audit
            .record_deletion(DeletionRecord {
                case_id: case_id.clone(),
                attachment_id: attachment.id.clone(),
                owner: attachment.attributes.owner.clone(),
                attributes: attachment.attributes.clone(),
                user: self.user.clone(),
            })
            .await?;

        self.handle_alerts(&attachment.attributes, case_id).await
    }

    /// Unlink the alerts referenced by a just-deleted alert-link attachment.
    ///
    /// No-op for non-alert kinds; never contacts the alerts subsystem for
    /// them.
    async fn handle_alerts(
        &self,
        attributes: &AttachmentAttributes,
        case_id: &CaseId,
    ) -> Result<(), AttachmentError> {
        if !attributes.is_alert_link() {
            return Ok(());
        }

        let alerts = attributes.alert_info();
        self.alerts.ensure_alerts_authorized(&alerts).await?;
        self.alerts.unlink_alerts_from_case(&alerts, case_id).await
    }
}
