use crate::auth::{AuthTokenProvider, JwtConfig};
use crate::domain::{DomainError, DomainResult};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session access token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the user id
    pub sub: String,
    /// Expiration, seconds since the epoch
    pub exp: usize,
    /// Issued-at, seconds since the epoch
    pub iat: usize,
}

/// JWT-based implementation of AuthTokenProvider
pub struct JwtAuthTokenProvider {
    config: JwtConfig,
}

impl JwtAuthTokenProvider {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl AuthTokenProvider for JwtAuthTokenProvider {
    fn generate_token(&self, user_id: &str) -> DomainResult<String> {
        let issued_at = chrono::Utc::now();
        let expires_at = issued_at + chrono::Duration::hours(self.config.expiration_hours as i64);

        let claims = JwtClaims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: issued_at.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| DomainError::RepositoryError(anyhow::anyhow!("JWT encoding error: {}", e)))
    }

    fn validate_token(&self, token: &str) -> DomainResult<String> {
        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| DomainError::InvalidToken(e.to_string()))?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key".to_string(), 24)
    }

    #[test]
    fn test_generate_token_success() {
        let provider = JwtAuthTokenProvider::new(test_config());
        let token = provider.generate_token("user-123");
        assert!(token.is_ok());
        assert!(!token.unwrap().is_empty());
    }

    #[test]
    fn test_validate_token_round_trip() {
        let provider = JwtAuthTokenProvider::new(test_config());
        let token = provider.generate_token("user-123").unwrap();

        let user_id = provider.validate_token(&token);
        assert_eq!(user_id.unwrap(), "user-123");
    }

    #[test]
    fn test_validate_token_invalid() {
        let provider = JwtAuthTokenProvider::new(test_config());
        let result = provider.validate_token("invalid-token");
        assert!(matches!(result, Err(DomainError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let provider1 = JwtAuthTokenProvider::new(test_config());
        let provider2 =
            JwtAuthTokenProvider::new(JwtConfig::new("different-secret".to_string(), 24));

        let token = provider1.generate_token("user-123").unwrap();
        let result = provider2.validate_token(&token);
        assert!(matches!(result, Err(DomainError::InvalidToken(_))));
    }
}
