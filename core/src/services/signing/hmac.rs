//! Shared-secret signing

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DomainError, DomainResult};

use super::backend::{
    generation_error, map_jwt_error, sealed, validation_for, ParsedToken, SigningBackend,
    UnsignedToken,
};

/// Signs and verifies with one shared secret; a per-call key replaces it
#[derive(Clone)]
pub struct HmacSigner {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl HmacSigner {
    /// Creates a signer for one of the HS algorithms
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Configuration)` - Non-HMAC algorithm or empty secret
    pub fn new(algorithm: Algorithm, secret: &[u8]) -> Result<Self, DomainError> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::Configuration {
                message: format!("{:?} is not an HMAC signing method", algorithm),
            });
        }
        if secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "HMAC signing requires a non-empty secret".to_string(),
            });
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: validation_for(algorithm),
        })
    }
}

impl sealed::Sealed for HmacSigner {}

impl SigningBackend for HmacSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign<C: Serialize>(
        &self,
        token: &UnsignedToken<C>,
        key: Option<&[u8]>,
    ) -> DomainResult<String> {
        match key {
            Some(key) => encode(&token.header, &token.claims, &EncodingKey::from_secret(key)),
            None => encode(&token.header, &token.claims, &self.encoding_key),
        }
        .map_err(generation_error)
    }

    fn parse<C: DeserializeOwned>(
        &self,
        signed_string: &str,
        key: Option<&[u8]>,
    ) -> DomainResult<ParsedToken<C>> {
        match key {
            Some(key) => decode(signed_string, &DecodingKey::from_secret(key), &self.validation),
            None => decode(signed_string, &self.decoding_key, &self.validation),
        }
        .map_err(map_jwt_error)
    }
}
