//! Common domain types.

mod id;
mod user;

pub use id::{AlertId, AttachmentId, CaseId, Owner};
pub use user::User;
