//! Core use-case services.
//!
//! # Responsibility
//! - Sequence validation, mapping and persistence into single-shot operations.
//! - Keep the presentation layer decoupled from storage shapes.

pub mod employee_service;
