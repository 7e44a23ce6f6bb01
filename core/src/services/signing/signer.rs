//! Signing backend selected once from configuration

use jsonwebtoken::Algorithm;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use wu_shared::config::{JwtConfig, SigningMethod};

use crate::errors::{DomainError, DomainResult};

use super::backend::{sealed, ParsedToken, SigningBackend, UnsignedToken};
use super::hmac::HmacSigner;
use super::key_pair::KeyPairSigner;

/// The active signing backend of a deployment
#[derive(Debug, Clone)]
pub enum Signer {
    Hmac(HmacSigner),
    KeyPair(KeyPairSigner),
}

impl Signer {
    /// Builds the signer described by the configuration
    ///
    /// Key files are read here; any failure must stop startup.
    pub fn from_config(config: &JwtConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let algorithm = algorithm_for(config.signing_method);

        let signer = if config.signing_method.is_symmetric() {
            let secret = config.secret.as_deref().unwrap_or_default();
            Signer::Hmac(HmacSigner::new(algorithm, secret.as_bytes())?)
        } else {
            Signer::KeyPair(KeyPairSigner::new(
                algorithm,
                &config.private_key_path,
                &config.public_key_path,
            )?)
        };

        info!(signing_method = %config.signing_method, "JWT signer initialized");
        Ok(signer)
    }
}

/// Maps a configured signing method to the JWT algorithm
pub fn algorithm_for(method: SigningMethod) -> Algorithm {
    match method {
        SigningMethod::HS256 => Algorithm::HS256,
        SigningMethod::HS384 => Algorithm::HS384,
        SigningMethod::HS512 => Algorithm::HS512,
        SigningMethod::ES256 => Algorithm::ES256,
        SigningMethod::ES384 => Algorithm::ES384,
        SigningMethod::RS256 => Algorithm::RS256,
        SigningMethod::RS384 => Algorithm::RS384,
        SigningMethod::RS512 => Algorithm::RS512,
    }
}

impl From<HmacSigner> for Signer {
    fn from(signer: HmacSigner) -> Self {
        Signer::Hmac(signer)
    }
}

impl From<KeyPairSigner> for Signer {
    fn from(signer: KeyPairSigner) -> Self {
        Signer::KeyPair(signer)
    }
}

impl sealed::Sealed for Signer {}

impl SigningBackend for Signer {
    fn algorithm(&self) -> Algorithm {
        match self {
            Signer::Hmac(signer) => signer.algorithm(),
            Signer::KeyPair(signer) => signer.algorithm(),
        }
    }

    fn sign<C: Serialize>(
        &self,
        token: &UnsignedToken<C>,
        key: Option<&[u8]>,
    ) -> DomainResult<String> {
        match self {
            Signer::Hmac(signer) => signer.sign(token, key),
            Signer::KeyPair(signer) => signer.sign(token, key),
        }
    }

    fn parse<C: DeserializeOwned>(
        &self,
        signed_string: &str,
        key: Option<&[u8]>,
    ) -> DomainResult<ParsedToken<C>> {
        match self {
            Signer::Hmac(signer) => signer.parse(signed_string, key),
            Signer::KeyPair(signer) => signer.parse(signed_string, key),
        }
    }
}
