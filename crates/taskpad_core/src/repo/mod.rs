//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value data access contract the task store persists through.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository constructors verify connection/schema readiness up front.
//! - Repository APIs return semantic errors in addition to transport errors.

pub mod kv_repo;
