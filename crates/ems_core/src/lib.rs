//! Core domain logic for the employee management system.
//! This crate owns the employee/address invariants; front ends only see
//! transfer values and symbolic error codes.

pub mod db;
pub mod error_code;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;
pub mod validator;

pub use error_code::{message, ErrorCode};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use mapper::{
    address_to_entity, address_to_transfer, employee_to_entity, employee_to_transfer,
};
pub use model::entity::{Address, Employee};
pub use model::gender::Gender;
pub use model::transfer::{AddressTransfer, EmployeeTransfer};
pub use model::{AddressId, EmployeeId};
pub use repo::employee_repo::{EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository};
pub use service::employee_service::{EmployeeService, EmsError, EmsResult};
pub use validator::{validate_for_create, validate_for_update, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
