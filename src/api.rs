use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Response, Json};
use signup_api::{SignUp, Verdict};
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::{respond, AppError};

pub const SUCCESS_MESSAGE: &str = "Sign-up data successfully validated and received!";

#[derive(OpenApi)]
#[openapi(
    paths(sign_up),
    tags(
        (name = "signup", description = "Sign-up form validation")
    )
)]
pub struct Doc;

#[utoipa::path(
        post,
        path = "/signup",
        tag = "signup",
        responses(
            (status = 200, description = "All fields are valid",
                example = json!({ "message": SUCCESS_MESSAGE })),
            (status = 400, description = "At most one violation per failing field, in field order",
                example = json!({ "errors": [
                    { "field": "username", "message": "Username must be between 3 and 20 characters." }
                ] })),
        ),
    )]
pub async fn sign_up(payload: Result<Json<SignUp>, JsonRejection>) -> Result<Response, AppError> {
    // Malformed bodies never reach the validator.
    let Json(sign_up) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(%rejection, "Rejected sign-up request body");
            return Ok(respond::error(
                StatusCode::BAD_REQUEST,
                "Invalid request body",
                &rejection.body_text(),
            ));
        }
    };

    info!(
        username = %sign_up.username,
        email = %sign_up.email,
        phone_number = %sign_up.phone_number,
        "Received sign-up data"
    );

    match sign_up.verdict() {
        Verdict::Valid => {
            info!("Sign-up data is valid");
            Ok(respond::message(StatusCode::OK, SUCCESS_MESSAGE))
        }
        Verdict::Invalid(violations) => {
            warn!(?violations, "Sign-up validation failed");
            respond::violations(StatusCode::BAD_REQUEST, &violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::Doc;

    #[test]
    fn documents_the_signup_endpoint() {
        let doc = Doc::openapi();
        let path = doc.paths.paths.get("/signup").expect("/signup is documented");
        let json = serde_json::to_value(path).unwrap();
        assert!(json.get("post").is_some());
        assert_eq!(doc.paths.paths.len(), 1);
    }
}
