use std::sync::Arc;

use actix_web::web;
use chrono::{Duration, Local};
use serde_json::{json, Value};

use employee_api::db::{EmployeeStore, MemoryEmployeeStore};
use employee_api::services::employee::EmployeeService;
use employee_api::utils::validation::EmployeeValidator;

/// Service wired the way `main.rs` wires it, on top of the given store.
pub fn service_with(store: Arc<dyn EmployeeStore>) -> web::Data<EmployeeService> {
    web::Data::new(EmployeeService::new(store, EmployeeValidator::new()))
}

pub fn memory_service() -> web::Data<EmployeeService> {
    service_with(Arc::new(MemoryEmployeeStore::new()))
}

pub fn john_doe() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@test.test",
        "hireDate": "2099-01-01",
        "salary": 3000,
    })
}

/// `YYYY-MM-DD` offset from the server's local today.
pub fn days_from_today(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
