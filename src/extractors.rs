// Json and Query wrappers whose rejections land in the domain error taxonomy
// instead of axum's plain-text defaults, so a malformed body or query string
// comes back as a 400 inside the uniform error envelope.
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::errors::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, FromRequestParts};
    use axum::http::{header, Request, StatusCode};

    use crate::errors::response::ErrorBody;
    use crate::models::{CreateTaskRequest, FilterTasksQuery, ListTasksQuery};

    #[tokio::test]
    async fn malformed_json_body_becomes_a_validation_error() {
        let body = r#"{"title":"pay rent","description":"before friday","status":"Bogus","priority":"Low","dueDate":"2026-09-01T00:00:00Z"}"#;
        let req = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let error = match Json::<CreateTaskRequest>::from_request(req, &()).await {
            Ok(_) => panic!("bogus status must be rejected"),
            Err(error) => error,
        };

        assert!(matches!(error, AppError::Validation(_)));

        // 400, not axum's 422, and carrying the ErrorBody extension so the
        // envelope middleware rewrites it into the uniform JSON shape.
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<ErrorBody>().is_some());
    }

    #[tokio::test]
    async fn malformed_query_string_becomes_a_validation_error() {
        let (mut parts, _) = Request::builder()
            .uri("/api/tasks/filter?status=Bogus")
            .body(())
            .unwrap()
            .into_parts();

        let error = match Query::<FilterTasksQuery>::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("bogus status must be rejected"),
            Err(error) => error,
        };

        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn well_formed_query_passes_through() {
        let (mut parts, _) = Request::builder()
            .uri("/api/tasks?page=2&limit=5")
            .body(())
            .unwrap()
            .into_parts();

        let Query(query) = Query::<ListTasksQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
    }
}
