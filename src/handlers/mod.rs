pub mod employee;
pub mod health;

use actix_web::error::InternalError;
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::errors::{ApiError, ErrorResponse, Operation, ServiceError};

/// Registers every route plus the extractor error handlers, so that bad
/// bodies and bad ids answer in the same `{result, message}` shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::new(err.to_string(), "INVALID_REQUEST");
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });
    // An id that is not an integer cannot exist, so it answers like a
    // missing employee for that method: 404 on GET/DELETE, 400 on PUT.
    let path_config = web::PathConfig::default().error_handler(|err, req| {
        let response = ApiError::new(operation_for(req), ServiceError::NotFound).error_response();
        InternalError::from_response(err, response).into()
    });

    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api/employees")
            .app_data(json_config)
            .app_data(path_config)
            .service(web::resource("").route(web::post().to(employee::create_employee)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );
}

fn operation_for(req: &HttpRequest) -> Operation {
    match *req.method() {
        Method::PUT => Operation::Update,
        Method::DELETE => Operation::Delete,
        Method::POST => Operation::Create,
        _ => Operation::Find,
    }
}
