//! Repository layer: the persistence store contract and its SQLite backing.
//!
//! # Responsibility
//! - Define the narrow store contract the service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories do not validate business rules; the service does.

pub mod employee_repo;
