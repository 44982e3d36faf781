use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::errors::{AppError, AppResult};
use crate::models::AuthUser;
use crate::AppState;

// Routes reachable without a token.
const PUBLIC_PATHS: [&str; 2] = ["/api/auth/register", "/api/auth/login"];

// Validates the bearer token and injects the caller's identity into request
// extensions for downstream handlers.
pub async fn require_auth(
    State((_, jwt_service)): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    let path = req.uri().path();

    if PUBLIC_PATHS.contains(&path) {
        return Ok(next.run(req).await);
    }

    let token =
        bearer_token(&req).ok_or_else(|| AppError::Auth("missing bearer token".into()))?;

    let claims = jwt_service
        .validate_token(&token)
        .map_err(|_| AppError::Auth("invalid or expired token".into()))?;

    tracing::debug!("Authenticated request for user: {}", claims.username);

    req.extensions_mut().insert(AuthUser {
        id: claims.id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_authorization(value: &str) -> Request<Body> {
        Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let req = request_with_authorization("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn rejects_non_bearer_schemes() {
        let req = request_with_authorization("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&req), None);

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&req), None);
    }
}
