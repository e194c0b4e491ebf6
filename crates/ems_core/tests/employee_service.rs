use chrono::NaiveDate;
use ems_core::db::{error_chain, open_db_in_memory};
use ems_core::{
    AddressTransfer, EmployeeService, EmployeeTransfer, EmsError, ErrorCode, Gender,
    SqliteEmployeeRepository, ValidationError,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> EmployeeService<SqliteEmployeeRepository<'_>> {
    EmployeeService::new(SqliteEmployeeRepository::try_new(conn).unwrap())
}

fn candidate(name: &str, mobile: &str, email: &str) -> EmployeeTransfer {
    EmployeeTransfer {
        gender: Some(Gender::Other),
        salary: Some(10_000),
        date_of_joining: NaiveDate::from_ymd_opt(2024, 2, 1),
        ..EmployeeTransfer::new(name, mobile, email)
    }
}

fn with_address(mut transfer: EmployeeTransfer, city: &str) -> EmployeeTransfer {
    let mut address = AddressTransfer::new(city, "TN", "IN", "600001");
    address.street = Some("Anna Salai".to_string());
    transfer.address = Some(address);
    transfer
}

#[test]
fn create_returns_store_assigned_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create(&with_address(candidate("A", "9000000001", "a@x.com"), "Chennai"))
        .unwrap();

    let id = created.id.expect("id assigned");
    let address = created.address.as_ref().expect("address created");
    assert!(address.id.is_some());
    assert_eq!(address.employee_id, Some(id));
    assert_eq!(created.name, "A");
    assert_eq!(created.salary, Some(10_000));
    assert_eq!(service.get(id).unwrap(), created);
}

#[test]
fn create_ignores_caller_supplied_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut input = with_address(candidate("A", "9000000001", "a@x.com"), "Madurai");
    input.id = Some(999);
    if let Some(address) = input.address.as_mut() {
        address.id = Some(555);
        address.employee_id = Some(999);
    }

    let created = service.create(&input).unwrap();
    assert_ne!(created.id, Some(999));
    assert_eq!(
        created.address.as_ref().unwrap().employee_id,
        created.id
    );
}

#[test]
fn create_rejects_duplicate_mobile_and_email() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap();

    let err = service
        .create(&candidate("B", "9000000001", "b@x.com"))
        .unwrap_err();
    assert!(matches!(
        err,
        EmsError::Validation(ValidationError::DuplicateMobileNumber)
    ));
    assert_eq!(err.code(), ErrorCode::DuplicateMobileNumber);

    let err = service
        .create(&candidate("B", "9000000002", "a@x.com"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateEmail);

    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn update_merges_fields_and_keeps_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service
        .create(&with_address(candidate("A", "9000000001", "a@x.com"), "Salem"))
        .unwrap();
    let id = created.id.unwrap();
    let address_id = created.address.as_ref().unwrap().id;

    let mut change = created.clone();
    change.name = "A. Kumar".to_string();
    change.salary = Some(12_000);
    change.date_of_birth = NaiveDate::from_ymd_opt(1995, 3, 3);
    change.address.as_mut().unwrap().city = "Trichy".to_string();

    let updated = service.update(id, &change).unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "A. Kumar");
    assert_eq!(updated.salary, Some(12_000));
    assert_eq!(updated.address.as_ref().unwrap().id, address_id);
    assert_eq!(updated.address.as_ref().unwrap().city, "Trichy");
    assert_eq!(service.get(id).unwrap(), updated);
}

#[test]
fn update_without_address_removes_it() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service
        .create(&with_address(candidate("A", "9000000001", "a@x.com"), "Vellore"))
        .unwrap();
    let address_id = created.address.as_ref().and_then(|item| item.id).unwrap();

    let mut change = created.clone();
    change.address = None;
    let updated = service.update(created.id.unwrap(), &change).unwrap();

    assert!(updated.address.is_none());
    assert!(matches!(
        service.get_address(address_id).unwrap_err(),
        EmsError::AddressNotFound(found) if found == address_id
    ));
}

#[test]
fn update_can_add_an_address_later() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap();

    let change = with_address(created.clone(), "Erode");
    let updated = service.update(created.id.unwrap(), &change).unwrap();

    let address = updated.address.expect("address added");
    assert_eq!(address.employee_id, created.id);
    assert_eq!(service.get_address(address.id.unwrap()).unwrap().city, "Erode");
}

#[test]
fn update_with_other_id_is_rejected_and_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let first = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap();
    let second = service
        .create(&candidate("B", "9000000002", "b@x.com"))
        .unwrap();

    let mut change = first.clone();
    change.id = second.id;
    change.salary = Some(1);

    let err = service.update(first.id.unwrap(), &change).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IdentifierMismatch);
    assert_eq!(service.get(first.id.unwrap()).unwrap(), first);
    assert_eq!(service.get(second.id.unwrap()).unwrap(), second);
}

#[test]
fn update_rejects_mobile_owned_by_another_employee() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let first = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap();
    service
        .create(&candidate("B", "9000000002", "b@x.com"))
        .unwrap();

    let mut change = first.clone();
    change.mobile_number = "9000000002".to_string();

    let err = service.update(first.id.unwrap(), &change).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateMobileNumber);
    assert_eq!(service.get(first.id.unwrap()).unwrap(), first);
}

#[test]
fn operations_on_missing_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let kept = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap();
    let missing = kept.id.unwrap() + 100;

    assert!(matches!(
        service.get(missing).unwrap_err(),
        EmsError::EmployeeNotFound(id) if id == missing
    ));
    assert!(matches!(
        service.update(missing, &candidate("Z", "9000000009", "z@x.com")).unwrap_err(),
        EmsError::EmployeeNotFound(_)
    ));
    assert_eq!(
        service.delete(missing).unwrap_err().code(),
        ErrorCode::EmployeeNotFound
    );
    assert_eq!(service.list().unwrap(), vec![kept]);
}

#[test]
fn delete_removes_employee_and_address() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service
        .create(&with_address(candidate("A", "9000000001", "a@x.com"), "Karur"))
        .unwrap();
    let id = created.id.unwrap();
    let address_id = created.address.as_ref().and_then(|item| item.id).unwrap();

    service.delete(id).unwrap();

    assert_eq!(service.get(id).unwrap_err().code(), ErrorCode::EmployeeNotFound);
    assert_eq!(
        service.get_address(address_id).unwrap_err().code(),
        ErrorCode::AddressNotFound
    );
}

#[test]
fn store_failure_is_reported_with_store_code() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    conn.execute_batch("DROP TABLE addresses;").unwrap();

    let err = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap_err();
    assert!(matches!(err, EmsError::Store { .. }));
    assert_eq!(err.code(), ErrorCode::StoreFailure);
    assert_eq!(err.to_string(), "store failure EMS-E008");
    assert!(std::error::Error::source(&err).is_some());
    assert!(error_chain(&err).contains("no such table"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn store_constraint_failure_is_classified() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    conn.execute_batch(
        "CREATE TRIGGER block_inserts BEFORE INSERT ON employees
         BEGIN
             SELECT RAISE(ABORT, 'inserts are frozen');
         END;",
    )
    .unwrap();

    let err = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreConstraint);
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn corrupt_stored_row_is_classified() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = service
        .create(&candidate("A", "9000000001", "a@x.com"))
        .unwrap()
        .id
        .unwrap();

    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute("UPDATE employees SET gender = 'unknown' WHERE id = ?1;", [id])
        .unwrap();

    assert_eq!(service.get(id).unwrap_err().code(), ErrorCode::StoreCorrupt);
    assert_eq!(service.list().unwrap_err().code(), ErrorCode::StoreCorrupt);
}

#[test]
fn end_to_end_employee_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut first = EmployeeTransfer::new("A", "9000000001", "a@x.com");
    first.salary = Some(10_000);
    let created = service.create(&first).unwrap();
    let e1 = created.id.expect("E1 assigned");

    let duplicate = EmployeeTransfer::new("B", "9000000001", "b@x.com");
    assert_eq!(
        service.create(&duplicate).unwrap_err().code(),
        ErrorCode::DuplicateMobileNumber
    );

    let mut raise = created.clone();
    raise.salary = Some(12_000);
    let updated = service.update(e1, &raise).unwrap();
    assert_eq!(updated.id, Some(e1));
    assert_eq!(updated.salary, Some(12_000));

    service.delete(e1).unwrap();
    assert!(matches!(
        service.get(e1).unwrap_err(),
        EmsError::EmployeeNotFound(id) if id == e1
    ));
}
