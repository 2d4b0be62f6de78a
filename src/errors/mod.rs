use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::db::StoreError;
use crate::utils::validation::FieldError;

pub const NOT_FOUND_MESSAGE: &str = "Could not find employee";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(FieldError),

    #[error("Employee not found")]
    NotFound,

    #[error("{message}")]
    Persistence {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn persistence(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ServiceError::Persistence { message, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::NotFound => "NOT_FOUND",
            ServiceError::Persistence { .. } => "PERSISTENCE_ERROR",
        }
    }
}

/// The endpoint an error came from. Status codes depend on it: a missing
/// employee is a 404 for reads and deletes but a 400 for updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Find,
    Delete,
}

#[derive(Debug)]
pub struct ApiError {
    pub operation: Operation,
    pub error: ServiceError,
}

impl ApiError {
    pub fn new(operation: Operation, error: ServiceError) -> Self {
        Self { operation, error }
    }

    fn parts(&self) -> (StatusCode, String) {
        use Operation::*;
        use ServiceError::*;

        match (self.operation, &self.error) {
            (Create | Update, _) => (StatusCode::BAD_REQUEST, self.error.to_string()),
            (Find | Delete, NotFound) => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            (Delete, _) => (StatusCode::BAD_REQUEST, self.error.to_string()),
            (Find, _) => (StatusCode::INTERNAL_SERVER_ERROR, self.error.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub result: bool,
    pub message: String,
    pub code: &'static str,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            result: false,
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} failed: {}", self.operation, self.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, message) = self.parts();
        HttpResponse::build(status).json(ErrorResponse::new(message, self.error.code()))
    }
}
