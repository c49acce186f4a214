//! Shared types for Caseline.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Caller identity recorded on audit entries

pub mod types;

pub use types::{AlertId, AttachmentId, CaseId, Owner, User};
