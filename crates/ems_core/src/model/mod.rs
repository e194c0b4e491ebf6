//! Employee and address data shapes.
//!
//! # Responsibility
//! - `entity`: records as the store persists them.
//! - `transfer`: records as they cross into the presentation layer.
//!
//! # Invariants
//! - Both shapes carry the same fields, so conversion between them is lossless.
//! - Identifiers are assigned by the store and never change afterwards.

pub mod entity;
pub mod gender;
pub mod transfer;

/// Store-assigned employee identifier.
pub type EmployeeId = i64;

/// Store-assigned address identifier.
pub type AddressId = i64;
