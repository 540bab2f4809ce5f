//! Task list domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its identifier.
//! - Issue identifiers that never collide within one collection.
//!
//! # Invariants
//! - A `TodoId` is assigned once at creation and never changes.
//! - Ids are unique across the current collection.

pub mod todo;
