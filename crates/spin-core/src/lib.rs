//! # spin-core
//!
//! Core types, weighted selection, and report rollups for the task spinner.
//!
//! This crate provides the foundational types shared across all spinner crates:
//! - Entity structs for tasks and spin records
//! - Aggregate value types produced by the store's statistics queries
//! - Weighted random task selection
//! - Report windows and report rollups computed from spin history
//! - Cross-cutting error types
//!
//! Nothing here performs I/O. Persistence lives in `spin-db`.

pub mod entities;
pub mod errors;
pub mod report;
pub mod selection;
pub mod stats;
