use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

use super::Claims;

#[derive(Debug, Error)]
pub enum VerifyTokenError {
    #[error("Invalid token.")]
    InvalidToken,
}

/// Resolves a bearer token to the verified identity of its holder.
#[async_trait]
pub trait IdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, VerifyTokenError>;
}

/// Token verification against the identity provider's signing key. Tokens are
/// minted by the provider, never by this service.
pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(signing_key: &[u8]) -> Self {
        JwtIdentityVerifier {
            decoding_key: DecodingKey::from_secret(signing_key),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, VerifyTokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token verification failed. Original error: {:?}.", e);
                VerifyTokenError::InvalidToken
            })
    }
}
