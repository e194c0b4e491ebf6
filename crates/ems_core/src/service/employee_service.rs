//! Employee use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/get/list entry points over transfer values.
//! - Run each mutation as load -> validate -> map -> persist in one transaction.
//! - Classify failures into [`EmsError`] with a symbolic [`ErrorCode`].
//!
//! # Invariants
//! - Entity values never leave this module; callers only see transfer values.
//! - A stored employee id never changes after creation.
//! - Every operation is all-or-nothing; nothing is retried.

use crate::db::error_chain;
use crate::error_code::ErrorCode;
use crate::mapper::{
    address_to_entity, address_to_transfer, employee_to_entity, employee_to_transfer,
};
use crate::model::entity::Employee;
use crate::model::transfer::{AddressTransfer, EmployeeTransfer};
use crate::model::{AddressId, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use crate::validator::{validate_for_create, validate_for_update, ValidationError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type EmsResult<T> = Result<T, EmsError>;

/// Failure of an employee use-case.
#[derive(Debug)]
pub enum EmsError {
    /// Rejected by a uniqueness or identifier rule; nothing was written.
    Validation(ValidationError),
    EmployeeNotFound(EmployeeId),
    AddressNotFound(AddressId),
    /// The store failed; the transaction was rolled back.
    Store { code: ErrorCode, source: RepoError },
}

impl EmsError {
    /// Symbolic code for message lookup at the presentation boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(ValidationError::DuplicateMobileNumber) => {
                ErrorCode::DuplicateMobileNumber
            }
            Self::Validation(ValidationError::DuplicateEmail) => ErrorCode::DuplicateEmail,
            Self::Validation(ValidationError::IdentifierMismatch { .. }) => {
                ErrorCode::IdentifierMismatch
            }
            Self::EmployeeNotFound(_) => ErrorCode::EmployeeNotFound,
            Self::AddressNotFound(_) => ErrorCode::AddressNotFound,
            Self::Store { code, .. } => *code,
        }
    }
}

impl Display for EmsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::AddressNotFound(id) => write!(f, "address not found: {id}"),
            Self::Store { code, .. } => write!(f, "store failure {code}"),
        }
    }
}

impl Error for EmsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store { source, .. } => Some(source),
            Self::EmployeeNotFound(_) | Self::AddressNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for EmsError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for EmsError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EmployeeNotFound(id),
            other => {
                let code = match &other {
                    RepoError::Db(db) if db.is_constraint_violation() => {
                        ErrorCode::StoreConstraint
                    }
                    RepoError::InvalidData(_) | RepoError::InconsistentState(_) => {
                        ErrorCode::StoreCorrupt
                    }
                    _ => ErrorCode::StoreFailure,
                };
                Self::Store {
                    code,
                    source: other,
                }
            }
        }
    }
}

/// Employee service facade over a repository implementation.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an employee (and its address, when present).
    ///
    /// Identifiers on `transfer` are ignored: the store assigns them. Returns
    /// the stored record.
    ///
    /// # Errors
    /// - `Validation(DuplicateMobileNumber | DuplicateEmail)`.
    /// - `Store` on persistence failure.
    pub fn create(&self, transfer: &EmployeeTransfer) -> EmsResult<EmployeeTransfer> {
        let started_at = Instant::now();
        let result = self.repo.transaction(|repo| -> EmsResult<EmployeeTransfer> {
            let existing = repo.find_all()?;
            validate_for_create(transfer, &existing)?;

            let mut entity = employee_to_entity(transfer);
            entity.id = None;
            if let Some(address) = entity.address.as_mut() {
                address.id = None;
                address.employee_id = None;
            }

            let saved = repo.save(&entity)?;
            Ok(employee_to_transfer(&saved))
        });
        observe("employee_create", started_at, result, |created| created.id)
    }

    /// Replaces every mutable field of employee `id` with `transfer`'s values.
    ///
    /// `transfer.id` may be `None` or `Some(id)`; the stored id never changes.
    /// The address is replaced wholesale: `Some` keeps the stored address id,
    /// `None` removes the address.
    ///
    /// # Errors
    /// - `EmployeeNotFound` when `id` does not exist.
    /// - `Validation(IdentifierMismatch | DuplicateMobileNumber | DuplicateEmail)`.
    /// - `Store` on persistence failure.
    pub fn update(
        &self,
        id: EmployeeId,
        transfer: &EmployeeTransfer,
    ) -> EmsResult<EmployeeTransfer> {
        let started_at = Instant::now();
        let result = self.repo.transaction(|repo| -> EmsResult<EmployeeTransfer> {
            let current = repo.find_by_id(id)?.ok_or(EmsError::EmployeeNotFound(id))?;
            let existing = repo.find_all()?;
            validate_for_update(id, transfer, &existing)?;

            let merged = merge_mutable_fields(&current, id, transfer);
            let saved = repo.save(&merged)?;
            Ok(employee_to_transfer(&saved))
        });
        observe("employee_update", started_at, result, |updated| updated.id)
    }

    /// Deletes employee `id` together with its address.
    ///
    /// # Errors
    /// - `EmployeeNotFound` when `id` does not exist.
    /// - `Store` on persistence failure.
    pub fn delete(&self, id: EmployeeId) -> EmsResult<()> {
        let started_at = Instant::now();
        let result = self.repo.transaction(|repo| -> EmsResult<()> {
            let current = repo.find_by_id(id)?.ok_or(EmsError::EmployeeNotFound(id))?;
            repo.delete(&current)?;
            Ok(())
        });
        observe("employee_delete", started_at, result, |_| Some(id))
    }

    /// Gets one employee by id.
    pub fn get(&self, id: EmployeeId) -> EmsResult<EmployeeTransfer> {
        let started_at = Instant::now();
        let result = self
            .repo
            .find_by_id(id)
            .map_err(EmsError::from)
            .and_then(|found| found.ok_or(EmsError::EmployeeNotFound(id)))
            .map(|employee| employee_to_transfer(&employee));
        observe("employee_get", started_at, result, |found| found.id)
    }

    /// Gets one address by its own id.
    pub fn get_address(&self, id: AddressId) -> EmsResult<AddressTransfer> {
        let started_at = Instant::now();
        let result = self
            .repo
            .find_address_by_id(id)
            .map_err(EmsError::from)
            .and_then(|found| found.ok_or(EmsError::AddressNotFound(id)))
            .map(|address| address_to_transfer(&address));
        observe("address_get", started_at, result, |found| found.employee_id)
    }

    /// Lists all employees ordered by ascending id.
    pub fn list(&self) -> EmsResult<Vec<EmployeeTransfer>> {
        let started_at = Instant::now();
        let result: EmsResult<Vec<EmployeeTransfer>> = self
            .repo
            .find_all()
            .map_err(EmsError::from)
            .map(|employees| employees.iter().map(employee_to_transfer).collect());
        observe("employee_list", started_at, result, |_| None)
    }
}

fn merge_mutable_fields(
    current: &Employee,
    id: EmployeeId,
    transfer: &EmployeeTransfer,
) -> Employee {
    let mut merged = employee_to_entity(transfer);
    merged.id = Some(id);
    merged.address = transfer.address.as_ref().map(|address| {
        let mut address = address_to_entity(address);
        address.id = current.address.as_ref().and_then(|stored| stored.id);
        address.employee_id = Some(id);
        address
    });
    merged
}

// Logs one outcome line per call; only ids and codes, never personal fields.
fn observe<T>(
    event: &str,
    started_at: Instant,
    result: EmsResult<T>,
    employee_id: impl FnOnce(&T) -> Option<EmployeeId>,
) -> EmsResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(value) => match employee_id(value) {
            Some(id) => info!(
                "event={} module=service status=ok employee_id={} duration_ms={}",
                event, id, duration_ms
            ),
            None => info!(
                "event={} module=service status=ok duration_ms={}",
                event, duration_ms
            ),
        },
        Err(err) if matches!(err, EmsError::Store { .. }) => error!(
            "event={} module=service status=error error_code={} duration_ms={} error={}",
            event,
            err.code(),
            duration_ms,
            error_chain(err)
        ),
        Err(err) => warn!(
            "event={} module=service status=rejected error_code={} duration_ms={}",
            event,
            err.code(),
            duration_ms
        ),
    }
    result
}
