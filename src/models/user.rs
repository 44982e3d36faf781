use serde::{Deserialize, Serialize};

// Stored user document. The password field holds a bcrypt hash, never plain text,
// and this type must never be serialized into an HTTP response; use PublicUser.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
}

// The only user shape that crosses the HTTP boundary.
#[derive(Debug, Serialize, Clone)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

// Authenticated identity reconstructed from token claims by the auth middleware
// and injected into request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_exposes_password() {
        let user = User {
            id: "u1".into(),
            username: "alice".into(),
            password: "$2b$10$hash".into(),
        };

        let body = serde_json::to_value(PublicUser::from(&user)).unwrap();

        assert_eq!(body["id"], "u1");
        assert_eq!(body["username"], "alice");
        assert!(body.get("password").is_none());
    }
}
