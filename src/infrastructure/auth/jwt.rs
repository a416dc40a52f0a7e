use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::token_service::{AuthError, TOKEN_TTL_SECS, TokenService};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 access tokens signed with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> anyhow::Result<String> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: iat.max(0) as usize,
            exp: (iat + TOKEN_TTL_SECS).max(0) as usize,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid) -> anyhow::Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::Malformed)
    }
}
