//! Symbolic error codes and their human-readable messages.
//!
//! Core errors carry only an [`ErrorCode`]; the presentation layer calls
//! [`message`] when it needs text for a person.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateMobileNumber,
    DuplicateEmail,
    IdentifierMismatch,
    EmployeeNotFound,
    AddressNotFound,
    StoreConstraint,
    StoreCorrupt,
    StoreFailure,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 8] = [
        Self::DuplicateMobileNumber,
        Self::DuplicateEmail,
        Self::IdentifierMismatch,
        Self::EmployeeNotFound,
        Self::AddressNotFound,
        Self::StoreConstraint,
        Self::StoreCorrupt,
        Self::StoreFailure,
    ];

    /// Stable code string, safe to log.
    pub fn as_str(self) -> &'static str {
        entry(self).0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the human-readable message for `code`.
pub fn message(code: ErrorCode) -> &'static str {
    entry(code).1
}

fn entry(code: ErrorCode) -> (&'static str, &'static str) {
    match code {
        ErrorCode::DuplicateMobileNumber => (
            "EMS-E001",
            "Mobile number is already registered to another employee.",
        ),
        ErrorCode::DuplicateEmail => (
            "EMS-E002",
            "Email is already registered to another employee.",
        ),
        ErrorCode::IdentifierMismatch => ("EMS-E003", "Employee id cannot be changed."),
        ErrorCode::EmployeeNotFound => ("EMS-E004", "No employee exists with the given id."),
        ErrorCode::AddressNotFound => ("EMS-E005", "No address exists with the given id."),
        ErrorCode::StoreConstraint => ("EMS-E006", "The database rejected the change."),
        ErrorCode::StoreCorrupt => ("EMS-E007", "Stored employee data is unreadable."),
        ErrorCode::StoreFailure => (
            "EMS-E008",
            "The database is unavailable. Please try again.",
        ),
    }
}
