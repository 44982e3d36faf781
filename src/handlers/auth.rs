use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bcrypt::{hash, verify};
use serde_json::json;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::extractors::Json;
use crate::models::{Credentials, PublicUser, User};
use crate::services::JwtService;
use crate::AppState;

const BCRYPT_COST: u32 = 10;

pub async fn register(
    State((redis_service, jwt_service)): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Response> {
    credentials.validate()?;
    tracing::info!("Registration attempt for user: {}", credentials.username);

    ensure_username_free(!redis_service.user_exists(&credentials.username).await?)?;

    let password = hash(credentials.password.as_bytes(), BCRYPT_COST)?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: credentials.username,
        password,
    };

    // SET NX loses here if a concurrent registration grabbed the name between
    // the existence probe and the write; the loser fails the same guard.
    let created = redis_service.create_user(&user).await?;
    if !created {
        tracing::warn!("Lost registration race for user: {}", user.username);
    }
    ensure_username_free(created)?;

    tracing::info!("Registered user: {}", user.username);
    authenticated_response(&jwt_service, &user)
}

pub async fn login(
    State((redis_service, jwt_service)): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Response> {
    credentials.validate()?;
    tracing::info!("Login attempt for user: {}", credentials.username);

    let user = redis_service.get_user(&credentials.username).await?;
    let user = verify_credentials(user, &credentials.password).map_err(|e| {
        tracing::warn!("Invalid credentials for user: {}", credentials.username);
        e
    })?;

    tracing::info!("Logged in user: {}", user.username);
    authenticated_response(&jwt_service, &user)
}

// Registration uniqueness guard, applied to both the EXISTS pre-check and the
// SET NX outcome: a taken username is DuplicateUser from either side.
fn ensure_username_free(is_free: bool) -> AppResult<()> {
    if is_free {
        Ok(())
    } else {
        Err(AppError::DuplicateUser)
    }
}

// Both failure modes (unknown username, wrong password) collapse into the same
// error so callers cannot probe for registered usernames.
fn verify_credentials(user: Option<User>, password: &str) -> AppResult<User> {
    let user = user.ok_or(AppError::InvalidCredentials)?;

    if !verify(password.as_bytes(), &user.password).unwrap_or(false) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

// Token transport lives here at the boundary: the bearer token goes out in the
// Authorization header and is echoed in the JSON body next to the public user.
fn authenticated_response(jwt_service: &JwtService, user: &User) -> AppResult<Response> {
    let access_token = jwt_service.create_token(user)?;

    let body = json!({
        "user": PublicUser::from(user),
        "accessToken": access_token,
    });

    Ok((
        StatusCode::CREATED,
        [(header::AUTHORIZATION, format!("Bearer {}", access_token))],
        Json(body),
    )
        .into_response())
}
