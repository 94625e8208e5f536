use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token claims. The user id is opaque: `sub`, or `userId` as issued by the
/// external auth service. When both are present `sub` wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: impl Into<String>, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(JwtError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            sub: Some(user_id.into()),
            user_id: None,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// The identifier records are owned by. Empty strings count as absent.
    pub fn subject(&self) -> Option<&str> {
        non_empty(&self.sub).or_else(|| non_empty(&self.user_id))
    }
}

fn non_empty(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Token expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("Token carries no user id")]
    MissingSubject,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verifies HS256 bearer tokens against the server secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let key = (!secret.is_empty()).then(|| DecodingKey::from_secret(secret.as_bytes()));
        Self {
            key,
            validation: Validation::default(),
        }
    }

    /// Checks signature, expiry and that a user id is present.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let key = self.key.as_ref().ok_or(JwtError::InvalidSecret)?;
        let claims = decode::<Claims>(token, key, &self.validation)?.claims;
        if claims.subject().is_none() {
            return Err(JwtError::MissingSubject);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const SECRET: &str = "unit-test-secret";

    fn sign(payload: Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        (Utc::now() + Duration::hours(1)).timestamp()
    }

    #[test]
    fn issued_token_verifies() {
        let token = generate_jwt(&Claims::new("user-1", 1).unwrap(), SECRET).unwrap();

        let claims = TokenVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(claims.subject(), Some("user-1"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_jwt(&Claims::new("user-1", 1).unwrap(), SECRET).unwrap();
        let result = TokenVerifier::new("other-secret").verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign(json!({
            "sub": "user-1",
            "exp": (Utc::now() - Duration::hours(2)).timestamp(),
            "iat": (Utc::now() - Duration::hours(3)).timestamp(),
        }));
        assert!(TokenVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn empty_secret_rejects_everything() {
        let claims = Claims::new("user-1", 1).unwrap();
        assert!(matches!(generate_jwt(&claims, ""), Err(JwtError::InvalidSecret)));

        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(matches!(
            TokenVerifier::new("").verify(&token),
            Err(JwtError::InvalidSecret)
        ));
    }

    #[test]
    fn accepts_object_id_style_user_id_claim() {
        let token = sign(json!({ "userId": "65a1f0c2e4b0a1b2c3d4e5f6", "exp": in_one_hour() }));

        let claims = TokenVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(claims.subject(), Some("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(claims.iat, 0);
    }

    #[test]
    fn sub_takes_precedence_over_user_id() {
        let token = sign(json!({ "sub": "from-sub", "userId": "from-user-id", "exp": in_one_hour() }));

        let claims = TokenVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(claims.subject(), Some("from-sub"));

        let token = sign(json!({ "sub": "", "userId": "from-user-id", "exp": in_one_hour() }));
        let claims = TokenVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(claims.subject(), Some("from-user-id"));
    }

    #[test]
    fn rejects_token_without_user_id() {
        let verifier = TokenVerifier::new(SECRET);

        let token = sign(json!({ "exp": in_one_hour() }));
        assert!(matches!(verifier.verify(&token), Err(JwtError::MissingSubject)));

        let token = sign(json!({ "sub": "", "exp": in_one_hour() }));
        assert!(matches!(verifier.verify(&token), Err(JwtError::MissingSubject)));
    }

    #[test]
    fn rejects_non_string_user_id() {
        let token = sign(json!({ "sub": 42, "exp": in_one_hour() }));
        assert!(matches!(
            TokenVerifier::new(SECRET).verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn out_of_range_expiry_is_an_error() {
        assert!(matches!(
            Claims::new("user-1", u64::MAX),
            Err(JwtError::InvalidExpiry(u64::MAX))
        ));
        assert!(matches!(
            Claims::new("user-1", 10_000_000_000_000),
            Err(JwtError::InvalidExpiry(_))
        ));
        // Fits in a chrono Duration but not in a DateTime
        assert!(matches!(
            Claims::new("user-1", 10_000_000_000),
            Err(JwtError::InvalidExpiry(_))
        ));
    }
}
