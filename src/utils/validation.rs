use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::employee::{
    Employee, EmployeeDraft, EmployeePayload, SalaryValue, DATE_FORMAT,
};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z'-]+$").expect("name pattern is valid"));

pub const MIN_SALARY: Decimal = Decimal::ONE_HUNDRED;

/// A rejected field, reported as `field <name>: <message>`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: ValidationError,
}

impl FieldError {
    fn new(
        field: &'static str,
        code: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        Self { field, error }
    }

    pub fn message(&self) -> &str {
        self.error.message.as_deref().unwrap_or("This value is not valid.")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {}: {}", self.field, self.message())
    }
}

/// Raw field values after the payload has been merged over a base record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<SalaryValue>,
}

impl Candidate {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: Some(employee.first_name.clone()),
            last_name: Some(employee.last_name.clone()),
            email: Some(employee.email.clone()),
            hire_date: Some(employee.hire_date.format(DATE_FORMAT).to_string()),
            salary: Some(SalaryValue::Number(employee.salary.to_string())),
        }
    }

    /// Fields present in the payload replace the current ones, explicit
    /// nulls included.
    pub fn merge(mut self, payload: EmployeePayload) -> Self {
        if let Some(value) = payload.first_name {
            self.first_name = value;
        }
        if let Some(value) = payload.last_name {
            self.last_name = value;
        }
        if let Some(value) = payload.email {
            self.email = value;
        }
        if let Some(value) = payload.hire_date {
            self.hire_date = value;
        }
        if let Some(value) = payload.salary {
            self.salary = value;
        }
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeValidator;

impl EmployeeValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks every field in a fixed order (firstName, lastName, email,
    /// hireDate, salary) and collects the first failing rule of each one.
    pub fn validate(
        &self,
        candidate: &Candidate,
        today: NaiveDate,
    ) -> Result<EmployeeDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let first_name = collect(
            &mut errors,
            validate_name("firstName", candidate.first_name.as_deref()),
        );
        let last_name = collect(
            &mut errors,
            validate_name("lastName", candidate.last_name.as_deref()),
        );
        let email = collect(&mut errors, validate_email(candidate.email.as_deref()));
        let hire_date = collect(
            &mut errors,
            validate_hire_date(candidate.hire_date.as_deref(), today),
        );
        let salary = collect(&mut errors, validate_salary(candidate.salary.as_ref()));

        match (first_name, last_name, email, hire_date, salary) {
            (Some(first_name), Some(last_name), Some(email), Some(hire_date), Some(salary)) => {
                Ok(EmployeeDraft {
                    first_name,
                    last_name,
                    email,
                    hire_date,
                    salary,
                })
            }
            _ => Err(errors),
        }
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    result.map_err(|err| errors.push(err)).ok()
}

fn not_blank(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(FieldError::new(field, "blank", "This value should not be blank.")),
    }
}

fn validate_name(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    let name = not_blank(field, value)?;
    if !NAME_RE.is_match(&name) {
        return Err(FieldError::new(field, "regex", "This value is not valid."));
    }
    Ok(name)
}

fn validate_email(value: Option<&str>) -> Result<String, FieldError> {
    let email = not_blank("email", value)?;
    let has_dotted_domain = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if !validator::validate_email(email.as_str()) || !has_dotted_domain {
        return Err(FieldError::new(
            "email",
            "email",
            "This value is not a valid email address.",
        ));
    }
    Ok(email)
}

fn validate_hire_date(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let raw = not_blank("hireDate", value)?;
    let hire_date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| FieldError::new("hireDate", "date", "Please enter a valid date."))?;
    if hire_date < today {
        return Err(FieldError::new(
            "hireDate",
            "range",
            format!(
                "This value should be greater than or equal to {}.",
                today.format(DATE_FORMAT)
            ),
        ));
    }
    Ok(hire_date)
}

/// Parses without rounding: a value that does not fit a `Decimal` exactly
/// is not a number here.
fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str_exact(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn validate_salary(value: Option<&SalaryValue>) -> Result<Decimal, FieldError> {
    let salary = match value {
        Some(SalaryValue::Number(text) | SalaryValue::Text(text)) if !text.trim().is_empty() => {
            parse_decimal(text)
                .ok_or_else(|| FieldError::new("salary", "number", "Please enter a number."))?
        }
        _ => {
            return Err(FieldError::new(
                "salary",
                "blank",
                "This value should not be blank.",
            ))
        }
    };
    if salary < MIN_SALARY {
        return Err(FieldError::new(
            "salary",
            "range",
            format!("This value should be greater than or equal to {MIN_SALARY}."),
        ));
    }
    Ok(salary)
}
