use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::employee::EmployeeService;

pub async fn health(service: web::Data<EmployeeService>) -> HttpResponse {
    if service.ping().await {
        HttpResponse::Ok().json(json!({ "status": "ok" }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
    }
}
