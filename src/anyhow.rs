use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::respond;

/// Wraps `anyhow::Error` so that handlers can use `?` and still produce a response.
#[derive(Debug)]
pub struct AppError(::anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        respond::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &self.0.to_string(),
        )
    }
}

impl<E> From<E> for AppError
where
    E: Into<::anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use ::anyhow::anyhow;
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;

    #[test]
    fn renders_internal_server_error() {
        let response = AppError::from(anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
