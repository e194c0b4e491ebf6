//! Console menu over the employee service.
//!
//! # Responsibility
//! - Collect raw answers, turn them into transfer values and call the service.
//! - Render transfer values and look up messages for error codes.
//!
//! # Invariants
//! - Only transfer values and error codes cross into this module.
//! - End of input at any prompt ends the session without a partial write.

use crate::input::{
    format_date, parse_date, parse_email, parse_gender, parse_id, parse_mobile,
    parse_postal_code, parse_salary, parse_text, InputError,
};
use ems_core::{
    message, AddressTransfer, EmployeeRepository, EmployeeService, EmployeeTransfer, EmsError,
};
use std::io::{self, BufRead, Write};

const MENU: &str = "
==== Employee Management ====
1. Add employee
2. List employees
3. View employee
4. Update employee
5. Delete employee
6. View address
0. Exit";

/// Outcome of one prompt.
enum Answer<T> {
    Value(T),
    /// Blank line: keep the current value (or leave an optional field empty).
    Keep,
    /// `-` on an optional field.
    Clear,
}

/// Why a multi-prompt form stopped early.
enum Abort {
    EndOfInput,
    Io(io::Error),
}

impl From<io::Error> for Abort {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

type FormResult<T> = Result<T, Abort>;

pub struct Console<'svc, R: EmployeeRepository, I: BufRead, O: Write> {
    service: &'svc EmployeeService<R>,
    input: I,
    output: O,
}

impl<'svc, R: EmployeeRepository, I: BufRead, O: Write> Console<'svc, R, I, O> {
    pub fn new(service: &'svc EmployeeService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs the menu loop until `0` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            write!(self.output, "Choose an option: ")?;
            self.output.flush()?;

            let Some(choice) = self.read_line()? else {
                break;
            };
            let outcome = match choice.as_str() {
                "1" => self.add_employee(),
                "2" => self.list_employees().map_err(Abort::from),
                "3" => self.view_employee(),
                "4" => self.update_employee(),
                "5" => self.delete_employee(),
                "6" => self.view_address(),
                "0" => break,
                other => writeln!(self.output, "Unknown option `{other}`.").map_err(Abort::from),
            };
            match outcome {
                Ok(()) => {}
                Err(Abort::EndOfInput) => break,
                Err(Abort::Io(err)) => return Err(err),
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush()
    }

    fn add_employee(&mut self) -> FormResult<()> {
        let blank = EmployeeTransfer::new("", "", "");
        let draft = self.employee_form(&blank, false)?;
        match self.service.create(&draft) {
            Ok(created) => {
                writeln!(
                    self.output,
                    "Employee #{} created.",
                    display_id(created.id)
                )?;
                writeln!(self.output, "{}", render_employee(&created))?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn list_employees(&mut self) -> io::Result<()> {
        let employees = match self.service.list() {
            Ok(employees) => employees,
            Err(err) => return self.report(&err),
        };
        if employees.is_empty() {
            return writeln!(self.output, "No employees yet.");
        }

        writeln!(
            self.output,
            "{:<6} {:<24} {:<12} {:<32} {:>10}",
            "ID", "Name", "Mobile", "Email", "Salary"
        )?;
        for employee in &employees {
            writeln!(
                self.output,
                "{:<6} {:<24} {:<12} {:<32} {:>10}",
                display_id(employee.id),
                employee.name,
                employee.mobile_number,
                employee.email,
                employee
                    .salary
                    .map_or_else(|| "-".to_string(), |salary| salary.to_string())
            )?;
        }
        Ok(())
    }

    fn view_employee(&mut self) -> FormResult<()> {
        let id = self.ask_id("Employee id")?;
        match self.service.get(id) {
            Ok(employee) => writeln!(self.output, "{}", render_employee(&employee))?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn update_employee(&mut self) -> FormResult<()> {
        let id = self.ask_id("Employee id")?;
        let current = match self.service.get(id) {
            Ok(current) => current,
            Err(err) => return Ok(self.report(&err)?),
        };

        writeln!(
            self.output,
            "Press Enter to keep a value, `-` to clear an optional one."
        )?;
        let draft = self.employee_form(&current, true)?;
        match self.service.update(id, &draft) {
            Ok(updated) => {
                writeln!(self.output, "Employee #{id} updated.")?;
                writeln!(self.output, "{}", render_employee(&updated))?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn delete_employee(&mut self) -> FormResult<()> {
        let id = self.ask_id("Employee id")?;
        if !self.confirm(&format!("Delete employee #{id} and their address?"))? {
            writeln!(self.output, "Nothing deleted.")?;
            return Ok(());
        }
        match self.service.delete(id) {
            Ok(()) => writeln!(self.output, "Employee #{id} deleted.")?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn view_address(&mut self) -> FormResult<()> {
        let id = self.ask_id("Address id")?;
        match self.service.get_address(id) {
            Ok(address) => writeln!(
                self.output,
                "Address #{} of employee #{}: {}",
                display_id(address.id),
                display_id(address.employee_id),
                render_address(&address)
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    /// Walks every employee field. With `editing`, `base` supplies the values
    /// kept on a blank answer; otherwise required fields must be answered.
    fn employee_form(
        &mut self,
        base: &EmployeeTransfer,
        editing: bool,
    ) -> FormResult<EmployeeTransfer> {
        let shown = |value: String| editing.then_some(value);
        let mut draft = base.clone();

        let answer = self.ask("Name", shown(base.name.clone()), editing, false, parse_text)?;
        draft.name = required(answer, &base.name);
        let answer = self.ask(
            "Mobile number",
            shown(base.mobile_number.clone()),
            editing,
            false,
            parse_mobile,
        )?;
        draft.mobile_number = required(answer, &base.mobile_number);
        let answer = self.ask("Email", shown(base.email.clone()), editing, false, parse_email)?;
        draft.email = required(answer, &base.email);

        let answer = self.ask(
            "Date of birth (YYYY-MM-DD)",
            shown(display_opt(base.date_of_birth.map(format_date))),
            editing,
            true,
            parse_date,
        )?;
        draft.date_of_birth = optional(answer, base.date_of_birth);
        let answer = self.ask(
            "Gender (male/female/other)",
            shown(display_opt(base.gender.map(|gender| gender.label().to_string()))),
            editing,
            true,
            parse_gender,
        )?;
        draft.gender = optional(answer, base.gender);
        let answer = self.ask(
            "Salary",
            shown(display_opt(base.salary.map(|salary| salary.to_string()))),
            editing,
            true,
            parse_salary,
        )?;
        draft.salary = optional(answer, base.salary);
        let answer = self.ask(
            "Date of joining (YYYY-MM-DD)",
            shown(display_opt(base.date_of_joining.map(format_date))),
            editing,
            true,
            parse_date,
        )?;
        draft.date_of_joining = optional(answer, base.date_of_joining);

        draft.address = match &base.address {
            Some(address) if editing => {
                writeln!(self.output, "Address: {}", render_address(address))?;
                let choice =
                    self.ask_choice("Address: (k)eep, (e)dit, (r)emove", "k", &["k", "e", "r"])?;
                match choice.as_str() {
                    "e" => Some(self.address_form(address, true)?),
                    "r" => None,
                    _ => Some(address.clone()),
                }
            }
            _ => {
                if self.confirm("Add an address?")? {
                    let blank = AddressTransfer::new("", "", "", "");
                    Some(self.address_form(&blank, false)?)
                } else {
                    None
                }
            }
        };

        Ok(draft)
    }

    fn address_form(
        &mut self,
        base: &AddressTransfer,
        editing: bool,
    ) -> FormResult<AddressTransfer> {
        let shown = |value: &Option<String>| editing.then(|| display_opt(value.clone()));
        let mut draft = base.clone();

        let answer = self.ask("Door number", shown(&base.door_number), editing, true, parse_text)?;
        draft.door_number = optional(answer, base.door_number.clone());
        let answer = self.ask("Street", shown(&base.street), editing, true, parse_text)?;
        draft.street = optional(answer, base.street.clone());
        let answer = self.ask("Locality", shown(&base.locality), editing, true, parse_text)?;
        draft.locality = optional(answer, base.locality.clone());

        let shown = |value: &String| editing.then(|| value.clone());
        let answer = self.ask("City", shown(&base.city), editing, false, parse_text)?;
        draft.city = required(answer, &base.city);
        let answer = self.ask("State", shown(&base.state), editing, false, parse_text)?;
        draft.state = required(answer, &base.state);
        let answer = self.ask("Country", shown(&base.country), editing, false, parse_text)?;
        draft.country = required(answer, &base.country);
        let answer = self.ask(
            "Postal code",
            shown(&base.postal_code),
            editing,
            false,
            parse_postal_code,
        )?;
        draft.postal_code = required(answer, &base.postal_code);

        Ok(draft)
    }

    /// Prompts until the answer parses. A blank line is accepted when editing
    /// or when the field is optional; `-` clears optional fields.
    fn ask<T>(
        &mut self,
        label: &str,
        current: Option<String>,
        editing: bool,
        optional: bool,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> FormResult<Answer<T>> {
        loop {
            match &current {
                Some(value) => write!(self.output, "{label} [{value}]: ")?,
                None => write!(self.output, "{label}: ")?,
            }
            self.output.flush()?;

            let line = self.read_line()?.ok_or(Abort::EndOfInput)?;
            if line.is_empty() {
                if editing || optional {
                    return Ok(Answer::Keep);
                }
                writeln!(self.output, "  {}", InputError::Required)?;
                continue;
            }
            if optional && line == "-" {
                return Ok(Answer::Clear);
            }
            match parse(&line) {
                Ok(value) => return Ok(Answer::Value(value)),
                Err(err) => writeln!(self.output, "  {err}")?,
            }
        }
    }

    fn ask_id(&mut self, label: &str) -> FormResult<i64> {
        match self.ask(label, None, false, false, parse_id)? {
            Answer::Value(id) => Ok(id),
            // Unreachable for a required, non-editing prompt.
            Answer::Keep | Answer::Clear => Err(Abort::EndOfInput),
        }
    }

    fn ask_choice(&mut self, label: &str, default: &str, allowed: &[&str]) -> FormResult<String> {
        loop {
            write!(self.output, "{label} [{default}]: ")?;
            self.output.flush()?;
            let line = self
                .read_line()?
                .ok_or(Abort::EndOfInput)?
                .to_ascii_lowercase();
            if line.is_empty() {
                return Ok(default.to_string());
            }
            if allowed.contains(&line.as_str()) {
                return Ok(line);
            }
            writeln!(self.output, "  choose one of {}", allowed.join("/"))?;
        }
    }

    fn confirm(&mut self, question: &str) -> FormResult<bool> {
        let label = format!("{question} (y/n)");
        let choice = self.ask_choice(&label, "n", &["y", "n", "yes", "no"])?;
        Ok(choice.starts_with('y'))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &EmsError) -> io::Result<()> {
        let code = err.code();
        writeln!(self.output, "[{code}] {}", message(code))
    }
}

fn required(answer: Answer<String>, current: &str) -> String {
    match answer {
        Answer::Value(value) => value,
        Answer::Keep | Answer::Clear => current.to_string(),
    }
}

fn optional<T>(answer: Answer<T>, current: Option<T>) -> Option<T> {
    match answer {
        Answer::Value(value) => Some(value),
        Answer::Keep => current,
        Answer::Clear => None,
    }
}

fn display_opt(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "?".to_string(), |id| id.to_string())
}

pub fn render_employee(employee: &EmployeeTransfer) -> String {
    let mut lines = vec![
        format!("Employee #{}", display_id(employee.id)),
        format!("  Name:            {}", employee.name),
        format!(
            "  Date of birth:   {}",
            display_opt(employee.date_of_birth.map(format_date))
        ),
        format!(
            "  Gender:          {}",
            display_opt(employee.gender.map(|gender| gender.label().to_string()))
        ),
        format!("  Mobile:          {}", employee.mobile_number),
        format!("  Email:           {}", employee.email),
        format!(
            "  Salary:          {}",
            display_opt(employee.salary.map(|salary| salary.to_string()))
        ),
        format!(
            "  Date of joining: {}",
            display_opt(employee.date_of_joining.map(format_date))
        ),
    ];
    match &employee.address {
        Some(address) => lines.push(format!(
            "  Address #{}:     {}",
            display_id(address.id),
            render_address(address)
        )),
        None => lines.push("  Address:         -".to_string()),
    }
    lines.join("\n")
}

pub fn render_address(address: &AddressTransfer) -> String {
    let mut parts: Vec<&str> = [&address.door_number, &address.street, &address.locality]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    parts.extend([
        address.city.as_str(),
        address.state.as_str(),
        address.country.as_str(),
    ]);
    format!("{} - {}", parts.join(", "), address.postal_code)
}
