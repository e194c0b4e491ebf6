//! Boundary-crossing employee and address records.
//!
//! # Responsibility
//! - Carry employee data between the service and the presentation layer.
//! - Stay independent from storage shape; serialized names are stable.
//!
//! # Invariants
//! - A transfer value with `id = None` describes a not-yet-created employee.

use crate::model::gender::Gender;
use crate::model::{AddressId, EmployeeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee as seen by callers of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTransfer {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub mobile_number: String,
    pub email: String,
    pub salary: Option<i64>,
    pub date_of_joining: Option<NaiveDate>,
    pub address: Option<AddressTransfer>,
}

/// Address as seen by callers of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressTransfer {
    pub id: Option<AddressId>,
    pub door_number: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub employee_id: Option<EmployeeId>,
}

impl EmployeeTransfer {
    /// Starts a not-yet-created employee with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        mobile_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            date_of_birth: None,
            gender: None,
            mobile_number: mobile_number.into(),
            email: email.into(),
            salary: None,
            date_of_joining: None,
            address: None,
        }
    }
}

impl AddressTransfer {
    /// Starts an unsaved address with only the required fields set.
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            door_number: None,
            street: None,
            locality: None,
            city: city.into(),
            state: state.into(),
            country: country.into(),
            postal_code: postal_code.into(),
            employee_id: None,
        }
    }
}
