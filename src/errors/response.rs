use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::errors::AppError;

// Carried through response extensions so the envelope middleware can attach
// the request path, which IntoResponse has no access to.
#[derive(Clone)]
pub struct ErrorBody {
    pub status: StatusCode,
    pub message: String,
}

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidCredentials | AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Everything else, validation included, is a bad request.
            _ => StatusCode::BAD_REQUEST,
        };
        let message = self.to_string();

        let mut response = (status, Json(envelope(status, &message, ""))).into_response();
        response
            .extensions_mut()
            .insert(ErrorBody { status, message });
        response
    }
}

// Outermost middleware: rewrites error responses with the request path filled in.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let mut response = next.run(req).await;

    if let Some(error) = response.extensions_mut().remove::<ErrorBody>() {
        return (
            error.status,
            Json(envelope(error.status, &error.message, &path)),
        )
            .into_response();
    }

    response
}

fn envelope(status: StatusCode, message: &str, path: &str) -> Value {
    json!({
        "statusCode": status.as_u16(),
        "message": message,
        "timestamp": Utc::now().to_rfc3339(),
        "path": path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::DuplicateUser, StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::Auth("missing token".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
            (AppError::NotFound("Task"), StatusCode::NOT_FOUND),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn envelope_carries_status_message_and_path() {
        let body = envelope(StatusCode::NOT_FOUND, "Task not found", "/api/tasks/abc");

        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "Task not found");
        assert_eq!(body["path"], "/api/tasks/abc");
        assert!(body["timestamp"].is_string());
    }
}
