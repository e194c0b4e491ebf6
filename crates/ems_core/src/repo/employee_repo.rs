//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist employees with their optional address in `employees`/`addresses`.
//! - Provide the transaction boundary the service runs each mutation in.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Identifiers come from SQLite (`AUTOINCREMENT`) and are never reused.
//! - An employee has at most one address row (`addresses.employee_id` is unique).
//! - Deleting an employee removes its address through `ON DELETE CASCADE`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::entity::{Address, Employee};
use crate::model::gender::Gender;
use crate::model::{AddressId, EmployeeId};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    e.id,
    e.name,
    e.date_of_birth,
    e.gender,
    e.mobile_number,
    e.email,
    e.salary,
    e.date_of_joining,
    a.id AS a_id,
    a.door_number AS a_door_number,
    a.street AS a_street,
    a.locality AS a_locality,
    a.city AS a_city,
    a.state AS a_state,
    a.country AS a_country,
    a.postal_code AS a_postal_code
FROM employees e
LEFT JOIN addresses a ON a.employee_id = e.id";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "employees",
        &[
            "id",
            "name",
            "date_of_birth",
            "gender",
            "mobile_number",
            "email",
            "salary",
            "date_of_joining",
            "updated_at",
        ],
    ),
    (
        "addresses",
        &[
            "id",
            "employee_id",
            "door_number",
            "street",
            "locality",
            "city",
            "state",
            "country",
            "postal_code",
        ],
    ),
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EmployeeId),
    InvalidData(String),
    /// A write succeeded but the row could not be read back.
    InconsistentState(&'static str),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(_) => write!(f, "employee store operation failed"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
            Self::InconsistentState(details) => write!(f, "inconsistent employee state: {details}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract consumed by the employee service.
pub trait EmployeeRepository {
    /// Inserts (`id = None`) or updates the employee and its address.
    ///
    /// On update, `address = Some` upserts the single address row (keeping its
    /// id) and `address = None` removes it. Returns the stored record with all
    /// identifiers filled in. Multi-statement: run it inside [`Self::transaction`].
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_address_by_id(&self, id: AddressId) -> RepoResult<Option<Address>>;
    /// All employees ordered by ascending id.
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    /// Deletes the employee; its address goes with it.
    fn delete(&self, employee: &Employee) -> RepoResult<()>;
    /// Runs `f` in one transaction: committed when `f` returns `Ok`, rolled
    /// back entirely otherwise.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        Self: Sized,
        E: From<RepoError>,
        F: FnOnce(&Self) -> Result<T, E>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is not
    ///   the one this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn insert_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        self.conn.execute(
            "INSERT INTO employees (
                name,
                date_of_birth,
                gender,
                mobile_number,
                email,
                salary,
                date_of_joining
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                employee.name.as_str(),
                employee.date_of_birth,
                employee.gender.map(Gender::label),
                employee.mobile_number.as_str(),
                employee.email.as_str(),
                employee.salary,
                employee.date_of_joining,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_employee(&self, id: EmployeeId, employee: &Employee) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?2,
                date_of_birth = ?3,
                gender = ?4,
                mobile_number = ?5,
                email = ?6,
                salary = ?7,
                date_of_joining = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                id,
                employee.name.as_str(),
                employee.date_of_birth,
                employee.gender.map(Gender::label),
                employee.mobile_number.as_str(),
                employee.email.as_str(),
                employee.salary,
                employee.date_of_joining,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn upsert_address(&self, employee_id: EmployeeId, address: &Address) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO addresses (
                employee_id,
                door_number,
                street,
                locality,
                city,
                state,
                country,
                postal_code
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (employee_id) DO UPDATE SET
                door_number = excluded.door_number,
                street = excluded.street,
                locality = excluded.locality,
                city = excluded.city,
                state = excluded.state,
                country = excluded.country,
                postal_code = excluded.postal_code;",
            params![
                employee_id,
                address.door_number.as_deref(),
                address.street.as_deref(),
                address.locality.as_deref(),
                address.city.as_str(),
                address.state.as_str(),
                address.country.as_str(),
                address.postal_code.as_str(),
            ],
        )?;
        Ok(())
    }

    fn remove_address(&self, employee_id: EmployeeId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM addresses WHERE employee_id = ?1;",
            [employee_id],
        )?;
        Ok(())
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        let id = match employee.id {
            Some(id) => {
                self.update_employee(id, employee)?;
                id
            }
            None => self.insert_employee(employee)?,
        };

        match &employee.address {
            Some(address) => self.upsert_address(id, address)?,
            None => self.remove_address(id)?,
        }

        self.find_by_id(id)?
            .ok_or(RepoError::InconsistentState("saved employee not found in read-back"))
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE e.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn find_address_by_id(&self, id: AddressId) -> RepoResult<Option<Address>> {
        let address = self
            .conn
            .query_row(
                "SELECT
                    id,
                    employee_id,
                    door_number,
                    street,
                    locality,
                    city,
                    state,
                    country,
                    postal_code
                 FROM addresses
                 WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Address {
                        id: Some(row.get("id")?),
                        door_number: row.get("door_number")?,
                        street: row.get("street")?,
                        locality: row.get("locality")?,
                        city: row.get("city")?,
                        state: row.get("state")?,
                        country: row.get("country")?,
                        postal_code: row.get("postal_code")?,
                        employee_id: Some(row.get("employee_id")?),
                    })
                },
            )
            .optional()?;
        Ok(address)
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY e.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn delete(&self, employee: &Employee) -> RepoResult<()> {
        let id = employee.id.ok_or_else(|| {
            RepoError::InvalidData("cannot delete an employee that was never saved".to_string())
        })?;

        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        Self: Sized,
        E: From<RepoError>,
        F: FnOnce(&Self) -> Result<T, E>,
    {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;

        match f(self) {
            Ok(value) => {
                tx.commit().map_err(RepoError::from)?;
                Ok(value)
            }
            Err(err) => {
                match tx.rollback() {
                    Ok(()) => debug!("event=tx_rollback module=repo status=ok"),
                    Err(rollback_err) => error!(
                        "event=tx_rollback module=repo status=error error={}",
                        rollback_err
                    ),
                }
                Err(err)
            }
        }
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;

    let gender = match row.get::<_, Option<String>>("gender")? {
        Some(value) => Some(Gender::from_label(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid gender `{value}` in employees.gender"))
        })?),
        None => None,
    };

    let address = match row.get::<_, Option<AddressId>>("a_id")? {
        Some(address_id) => Some(Address {
            id: Some(address_id),
            door_number: row.get("a_door_number")?,
            street: row.get("a_street")?,
            locality: row.get("a_locality")?,
            city: row.get("a_city")?,
            state: row.get("a_state")?,
            country: row.get("a_country")?,
            postal_code: row.get("a_postal_code")?,
            employee_id: Some(id),
        }),
        None => None,
    };

    Ok(Employee {
        id: Some(id),
        name: row.get("name")?,
        date_of_birth: row.get("date_of_birth")?,
        gender,
        mobile_number: row.get("mobile_number")?,
        email: row.get("email")?,
        salary: row.get("salary")?,
        date_of_joining: row.get("date_of_joining")?,
        address,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
