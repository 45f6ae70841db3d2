use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use signup_api::Violation;

use crate::AppError;

pub fn message(code: StatusCode, message: &str) -> Response {
    (
        code,
        Json(json! { {
            "message": message
        } }),
    )
        .into_response()
}

pub fn error(code: StatusCode, error: &str, details: &str) -> Response {
    (
        code,
        Json(json! { {
            "error": error,
            "details": details,
        } }),
    )
        .into_response()
}

/// `{ "errors": [{ "field": .., "message": .. }, ..] }`
pub fn violations(code: StatusCode, violations: &[Violation]) -> Result<Response, AppError> {
    let errors = serde_json::to_value(violations)?;
    Ok((
        code,
        Json(json! { {
            "errors": errors
        } }),
    )
        .into_response())
}
