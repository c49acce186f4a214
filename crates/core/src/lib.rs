//! Core business logic for Caseline.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Persistence, authorization, audit logging, and the alerts
//! subsystem are consumed through traits and implemented by other crates.
//!
//! # Modules
//!
//! - `attachment` - Case attachment deletion workflow
//! - `concurrency` - Bounded-parallel mapping over async operations

pub mod attachment;
pub mod concurrency;

#[cfg(test)]
mod concurrency_props;
