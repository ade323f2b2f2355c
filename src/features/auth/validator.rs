use super::model::AuthenticatedUser;
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(rename = "exp")]
    _exp: u64,
}

impl JwtValidator {
    pub fn new(secret: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Rejected token header: {}", e);
            token_rejected()
        })?;

        if header.alg != Algorithm::HS256 {
            tracing::debug!("Rejected token algorithm: {:?}", header.alg);
            return Err(token_rejected());
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            token_rejected()
        })?;

        let user_id = token_data.claims.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(token_rejected());
        }

        Ok(AuthenticatedUser { user_id })
    }
}

fn token_rejected() -> AppError {
    AppError::Unauthorized("Token verification failed, authorization denied".to_string())
}
