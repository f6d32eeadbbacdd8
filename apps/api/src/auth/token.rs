use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

pub fn issue_token(
    user_id: Uuid,
    secret: &str,
    ttl_minutes: i64,
) -> Result<TokenResponse, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp() as usize,
    };
    let access_token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer",
    })
}

/// Validates signature and expiry, returning the claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    Ok(decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_round_trips_subject() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "test_secret_key", 30).unwrap();
        assert_eq!(token.token_type, "bearer");

        let claims = verify_token(&token.access_token, "test_secret_key").unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "test_secret_key", 30).unwrap();
        assert!(verify_token(&token.access_token, "wrong_secret_key").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default 60s leeway.
        let token = issue_token(Uuid::new_v4(), "test_secret_key", -10).unwrap();
        assert!(verify_token(&token.access_token, "test_secret_key").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not.a.jwt", "test_secret_key").is_err());
    }
}
