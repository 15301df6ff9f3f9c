use super::config::JwtConfig;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session token time-to-live: 7 days.
pub const SESSION_TOKEN_TTL: i64 = 604800;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // Subject (user ID)
    pub email: String, // User email
    pub name: String,  // User name
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
}

/// Stateless JWT authentication.
///
/// Issues and verifies HS256-signed session tokens. Tokens are not
/// stored server-side; expiry and signature checks are the only gate.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt_auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create a session token (7 days)
    pub fn create_session_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> eyre::Result<String> {
        self.create_token(user_id, email, name, SESSION_TOKEN_TTL)
    }

    /// Create a JWT token with the specified TTL
    fn create_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            exp,
            iat,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify JWT token signature and expiry, and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Extract a bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-32ch"))
    }

    #[test]
    fn test_token_round_trip() {
        let auth = test_auth();
        let user_id = "0191e9a0-0000-7000-8000-000000000001";

        let token = auth
            .create_session_token(user_id, "jane@example.com", "Jane")
            .unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.name, "Jane");
        assert_eq!(claims.exp - claims.iat, SESSION_TOKEN_TTL);
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let auth = test_auth();
        let token = auth
            .create_session_token("user-1", "a@b.c", "A")
            .unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('x') { 'y' } else { 'x' });

        assert!(auth.verify_token(&tampered).is_err());
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-long-enough-32"));

        let token = auth
            .create_session_token("user-1", "a@b.c", "A")
            .unwrap();

        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
