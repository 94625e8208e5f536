use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, JwtError};
use crate::database::OwnerId;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from JWT.
///
/// Only built from claims carrying a non-empty user id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    user_id: String,
}

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Owner filter for every store call made on behalf of this user.
    pub fn owner(&self) -> OwnerId {
        OwnerId::new(self.user_id.clone())
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims.subject().ok_or(JwtError::MissingSubject)?;
        Ok(Self {
            user_id: user_id.to_string(),
        })
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(|msg| {
        tracing::debug!("Rejected request to {}: {}", request.uri().path(), msg);
        ApiError::unauthorized(msg)
    })?;

    let user = state
        .verifier
        .verify(token)
        .and_then(AuthUser::try_from)
        .map_err(|e| {
            tracing::debug!("Rejected request to {}: {}", request.uri().path(), e);
            ApiError::unauthorized("Invalid or expired token")
        })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
