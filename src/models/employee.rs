use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored employee row.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Employee {
    /// Overwrites the editable fields with a validated draft. `id` and
    /// `created_at` are never touched.
    pub fn apply(&mut self, draft: EmployeeDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.hire_date = draft.hire_date;
        self.salary = draft.salary;
    }
}

/// Field values that passed validation but have not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
}

/// Request body for both creation and update.
///
/// Every field distinguishes "absent" (`None`) from "sent as null"
/// (`Some(None)`): absent fields keep their current value, null clears it.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeePayload {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub hire_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub salary: Option<Option<SalaryValue>>,
}

/// Salary as sent by the client, kept as source text so that no digit is
/// lost before it is parsed as a decimal.
#[derive(Debug, Clone, PartialEq)]
pub enum SalaryValue {
    /// Any JSON token other than a string, verbatim (`3000`, `99.5`, `true`).
    Number(String),
    Text(String),
}

impl<'de> Deserialize<'de> for SalaryValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get().trim();
        if token.starts_with('"') {
            serde_json::from_str(token)
                .map(SalaryValue::Text)
                .map_err(D::Error::custom)
        } else {
            Ok(SalaryValue::Number(token.to_string()))
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub salary: Decimal,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            hire_date: employee.hire_date.format(DATE_FORMAT).to_string(),
            salary: employee.salary,
            created_at: employee.created_at.format(DATETIME_FORMAT).to_string(),
            updated_at: employee
                .updated_at
                .map(|at| at.format(DATETIME_FORMAT).to_string()),
        }
    }
}
