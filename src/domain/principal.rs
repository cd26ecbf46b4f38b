use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Member,
    Admin,
}

/// Authenticated caller, produced once from the fronting auth layer's headers
/// and passed by value into handlers.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
}

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        };

        let id = header("x-user-id")
            .and_then(|v| Uuid::parse_str(&v).ok())
            .ok_or((StatusCode::UNAUTHORIZED, "missing or invalid x-user-id"))?;
        let email = header("x-user-email")
            .ok_or((StatusCode::UNAUTHORIZED, "missing x-user-email"))?;
        let role = match header("x-user-role").as_deref() {
            Some("ADMIN") => Role::Admin,
            _ => Role::Member,
        };

        Ok(Principal { id, role, email })
    }
}
