use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::{ApiError, Operation};
use crate::models::employee::{EmployeePayload, EmployeeResponse};
use crate::services::employee::EmployeeService;

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    let employee = service
        .create(payload.into_inner())
        .await
        .map_err(|err| ApiError::new(Operation::Create, err))?;

    Ok(HttpResponse::Created().json(json!({
        "result": true,
        "message": "Employee created successfully",
        "data": {
            "id": employee.id,
        },
    })))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    service
        .update(id.into_inner(), payload.into_inner())
        .await
        .map_err(|err| ApiError::new(Operation::Update, err))?;

    Ok(HttpResponse::Created().json(json!({
        "result": true,
        "message": "Employee updated successfully",
    })))
}

pub async fn get_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let employee = service
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| ApiError::new(Operation::Find, err))?;

    Ok(HttpResponse::Ok().json(json!({
        "result": true,
        "data": EmployeeResponse::from(&employee),
    })))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let removed = service
        .remove(id.into_inner())
        .await
        .map_err(|err| ApiError::new(Operation::Delete, err))?;

    Ok(HttpResponse::Ok().json(json!({
        "result": removed,
    })))
}
