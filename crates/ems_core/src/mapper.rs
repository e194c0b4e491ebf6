//! Entity <-> transfer conversion.
//!
//! # Invariants
//! - Every field is copied verbatim; `None` stays `None`.
//! - `employee_to_transfer(&employee_to_entity(t)) == t` and the reverse.
//! - Conversion never fails and never validates.

use crate::model::entity::{Address, Employee};
use crate::model::transfer::{AddressTransfer, EmployeeTransfer};

/// Converts a stored employee (and its address, if any) to its transfer form.
pub fn employee_to_transfer(entity: &Employee) -> EmployeeTransfer {
    EmployeeTransfer {
        id: entity.id,
        name: entity.name.clone(),
        date_of_birth: entity.date_of_birth,
        gender: entity.gender,
        mobile_number: entity.mobile_number.clone(),
        email: entity.email.clone(),
        salary: entity.salary,
        date_of_joining: entity.date_of_joining,
        address: entity.address.as_ref().map(address_to_transfer),
    }
}

/// Converts a transfer value to an entity.
///
/// Identifiers are copied as given; callers decide whether to keep or clear
/// them before persisting.
pub fn employee_to_entity(transfer: &EmployeeTransfer) -> Employee {
    Employee {
        id: transfer.id,
        name: transfer.name.clone(),
        date_of_birth: transfer.date_of_birth,
        gender: transfer.gender,
        mobile_number: transfer.mobile_number.clone(),
        email: transfer.email.clone(),
        salary: transfer.salary,
        date_of_joining: transfer.date_of_joining,
        address: transfer.address.as_ref().map(address_to_entity),
    }
}

/// Address counterpart of [`employee_to_transfer`].
pub fn address_to_transfer(entity: &Address) -> AddressTransfer {
    AddressTransfer {
        id: entity.id,
        door_number: entity.door_number.clone(),
        street: entity.street.clone(),
        locality: entity.locality.clone(),
        city: entity.city.clone(),
        state: entity.state.clone(),
        country: entity.country.clone(),
        postal_code: entity.postal_code.clone(),
        employee_id: entity.employee_id,
    }
}

/// Address counterpart of [`employee_to_entity`].
pub fn address_to_entity(transfer: &AddressTransfer) -> Address {
    Address {
        id: transfer.id,
        door_number: transfer.door_number.clone(),
        street: transfer.street.clone(),
        locality: transfer.locality.clone(),
        city: transfer.city.clone(),
        state: transfer.state.clone(),
        country: transfer.country.clone(),
        postal_code: transfer.postal_code.clone(),
        employee_id: transfer.employee_id,
    }
}

impl From<Employee> for EmployeeTransfer {
    fn from(value: Employee) -> Self {
        employee_to_transfer(&value)
    }
}

impl From<EmployeeTransfer> for Employee {
    fn from(value: EmployeeTransfer) -> Self {
        employee_to_entity(&value)
    }
}

impl From<Address> for AddressTransfer {
    fn from(value: Address) -> Self {
        address_to_transfer(&value)
    }
}

impl From<AddressTransfer> for Address {
    fn from(value: AddressTransfer) -> Self {
        address_to_entity(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::{address_to_entity, address_to_transfer, employee_to_entity, employee_to_transfer};
    use crate::model::entity::{Address, Employee};
    use crate::model::gender::Gender;
    use crate::model::transfer::{AddressTransfer, EmployeeTransfer};
    use chrono::NaiveDate;

    fn full_transfer() -> EmployeeTransfer {
        EmployeeTransfer {
            id: Some(7),
            name: "Asha".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
            gender: Some(Gender::Female),
            mobile_number: "9000000001".to_string(),
            email: "asha@example.com".to_string(),
            salary: Some(52_000),
            date_of_joining: NaiveDate::from_ymd_opt(2021, 1, 4),
            address: Some(AddressTransfer {
                id: Some(3),
                door_number: Some("12B".to_string()),
                street: Some("MG Road".to_string()),
                locality: None,
                city: "Pune".to_string(),
                state: "MH".to_string(),
                country: "IN".to_string(),
                postal_code: "411001".to_string(),
                employee_id: Some(7),
            }),
        }
    }

    #[test]
    fn employee_transfer_survives_round_trip() {
        let transfer = full_transfer();
        assert_eq!(employee_to_transfer(&employee_to_entity(&transfer)), transfer);
    }

    #[test]
    fn sparse_transfer_keeps_absent_fields_absent() {
        let transfer = EmployeeTransfer::new("B", "9000000002", "b@x.com");
        let entity = employee_to_entity(&transfer);

        assert_eq!(entity.id, None);
        assert_eq!(entity.salary, None);
        assert_eq!(entity.gender, None);
        assert!(entity.address.is_none());
        assert_eq!(employee_to_transfer(&entity), transfer);
    }

    #[test]
    fn entity_survives_round_trip() {
        let entity: Employee = full_transfer().into();
        let back: Employee = EmployeeTransfer::from(entity.clone()).into();
        assert_eq!(back, entity);
    }

    #[test]
    fn address_maps_field_for_field() {
        let address = Address {
            id: None,
            door_number: None,
            street: Some("Ring Rd".to_string()),
            locality: Some("Old Town".to_string()),
            city: "Delhi".to_string(),
            state: "DL".to_string(),
            country: "IN".to_string(),
            postal_code: "110001".to_string(),
            employee_id: None,
        };

        let transfer = address_to_transfer(&address);
        assert_eq!(transfer.street.as_deref(), Some("Ring Rd"));
        assert_eq!(transfer.postal_code, "110001");
        assert_eq!(address_to_entity(&transfer), address);
    }
}
