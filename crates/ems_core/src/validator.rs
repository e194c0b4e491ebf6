//! Uniqueness and identifier checks run before a mutation is committed.
//!
//! # Invariants
//! - Checks run against the full employee snapshot read from the store.
//! - Mobile number is checked before email; the first violation wins.
//! - Matching is exact string equality.

use crate::model::entity::Employee;
use crate::model::transfer::EmployeeTransfer;
use crate::model::EmployeeId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rule violations detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Another employee already uses this mobile number.
    DuplicateMobileNumber,
    /// Another employee already uses this email.
    DuplicateEmail,
    /// Update payload names a different employee than the update target.
    IdentifierMismatch {
        expected: EmployeeId,
        found: EmployeeId,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateMobileNumber => write!(f, "mobile number is already registered"),
            Self::DuplicateEmail => write!(f, "email is already registered"),
            Self::IdentifierMismatch { expected, found } => write!(
                f,
                "employee id cannot change: target {expected}, payload {found}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Checks a not-yet-created employee against every stored employee.
pub fn validate_for_create(
    candidate: &EmployeeTransfer,
    existing: &[Employee],
) -> Result<(), ValidationError> {
    ensure_unique(candidate, existing.iter())
}

/// Checks an update of `target_id` against every other stored employee.
///
/// A candidate without an id is treated as addressing `target_id`.
pub fn validate_for_update(
    target_id: EmployeeId,
    candidate: &EmployeeTransfer,
    existing: &[Employee],
) -> Result<(), ValidationError> {
    if let Some(found) = candidate.id {
        if found != target_id {
            return Err(ValidationError::IdentifierMismatch {
                expected: target_id,
                found,
            });
        }
    }

    ensure_unique(
        candidate,
        existing
            .iter()
            .filter(|employee| employee.id != Some(target_id)),
    )
}

fn ensure_unique<'a>(
    candidate: &EmployeeTransfer,
    others: impl Iterator<Item = &'a Employee> + Clone,
) -> Result<(), ValidationError> {
    if others
        .clone()
        .any(|employee| employee.mobile_number == candidate.mobile_number)
    {
        return Err(ValidationError::DuplicateMobileNumber);
    }
    if others
        .into_iter()
        .any(|employee| employee.email == candidate.email)
    {
        return Err(ValidationError::DuplicateEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_for_create, validate_for_update, ValidationError};
    use crate::mapper::employee_to_entity;
    use crate::model::entity::Employee;
    use crate::model::transfer::EmployeeTransfer;

    fn stored(id: i64, mobile: &str, email: &str) -> Employee {
        let mut transfer = EmployeeTransfer::new(format!("emp-{id}"), mobile, email);
        transfer.id = Some(id);
        employee_to_entity(&transfer)
    }

    fn snapshot() -> Vec<Employee> {
        vec![
            stored(1, "9000000001", "a@x.com"),
            stored(2, "9000000002", "b@x.com"),
        ]
    }

    #[test]
    fn create_accepts_fresh_mobile_and_email() {
        let candidate = EmployeeTransfer::new("C", "9000000003", "c@x.com");
        assert_eq!(validate_for_create(&candidate, &snapshot()), Ok(()));
        assert_eq!(validate_for_create(&candidate, &[]), Ok(()));
    }

    #[test]
    fn create_rejects_duplicate_mobile_before_email() {
        let candidate = EmployeeTransfer::new("C", "9000000001", "b@x.com");
        assert_eq!(
            validate_for_create(&candidate, &snapshot()),
            Err(ValidationError::DuplicateMobileNumber)
        );
    }

    #[test]
    fn create_rejects_duplicate_email() {
        let candidate = EmployeeTransfer::new("C", "9000000003", "b@x.com");
        assert_eq!(
            validate_for_create(&candidate, &snapshot()),
            Err(ValidationError::DuplicateEmail)
        );
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let candidate = EmployeeTransfer::new("C", "9000000003", "A@x.com");
        assert_eq!(validate_for_create(&candidate, &snapshot()), Ok(()));
    }

    #[test]
    fn update_may_keep_its_own_mobile_and_email() {
        let mut candidate = EmployeeTransfer::new("A2", "9000000001", "a@x.com");
        candidate.id = Some(1);
        assert_eq!(validate_for_update(1, &candidate, &snapshot()), Ok(()));

        candidate.id = None;
        assert_eq!(validate_for_update(1, &candidate, &snapshot()), Ok(()));
    }

    #[test]
    fn update_rejects_values_owned_by_another_employee() {
        let candidate = EmployeeTransfer::new("A2", "9000000002", "a@x.com");
        assert_eq!(
            validate_for_update(1, &candidate, &snapshot()),
            Err(ValidationError::DuplicateMobileNumber)
        );

        let candidate = EmployeeTransfer::new("A2", "9000000001", "b@x.com");
        assert_eq!(
            validate_for_update(1, &candidate, &snapshot()),
            Err(ValidationError::DuplicateEmail)
        );
    }

    #[test]
    fn update_rejects_identifier_change_first() {
        let mut candidate = EmployeeTransfer::new("A2", "9000000002", "b@x.com");
        candidate.id = Some(2);
        assert_eq!(
            validate_for_update(1, &candidate, &snapshot()),
            Err(ValidationError::IdentifierMismatch {
                expected: 1,
                found: 2
            })
        );
    }
}
