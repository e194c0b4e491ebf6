//! Persistence-shaped employee and address records.
//!
//! These are what the repository reads and writes. They never leave the core:
//! callers outside the service layer see [`crate::model::transfer`] values.
//!
//! # Invariants
//! - `id` is `None` only before the first save.
//! - `Address::employee_id` names the owning employee once saved.

use crate::model::gender::Gender;
use crate::model::{AddressId, EmployeeId};
use chrono::NaiveDate;

/// Stored employee row plus its optional owned address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    /// Unique across all employees.
    pub mobile_number: String,
    /// Unique across all employees.
    pub email: String,
    /// Whole currency units.
    pub salary: Option<i64>,
    pub date_of_joining: Option<NaiveDate>,
    /// Zero-or-one owned address; deleted together with the employee.
    pub address: Option<Address>,
}

/// Stored address row, owned by exactly one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: Option<AddressId>,
    pub door_number: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    /// Back-reference to the owning employee.
    pub employee_id: Option<EmployeeId>,
}
