//! Signing backend trait and the token shapes it works with

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, TokenData, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DomainError, DomainResult, TokenError};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A token built from claims that has not been signed yet
#[derive(Debug, Clone)]
pub struct UnsignedToken<C> {
    pub header: Header,
    pub claims: C,
}

/// A token whose signature, algorithm and expiry were validated
pub type ParsedToken<C> = TokenData<C>;

/// Issues, signs and parses JWTs with the signing method chosen at startup.
///
/// Implemented only by the symmetric and asymmetric signers of this module
/// and by [`Signer`](super::Signer), which selects one of them.
pub trait SigningBackend: sealed::Sealed + Send + Sync {
    /// Signing method of every token this backend produces or accepts
    fn algorithm(&self) -> Algorithm;

    /// Wrap claims into an unsigned token with this backend's header
    fn issue<C>(&self, claims: C) -> UnsignedToken<C> {
        UnsignedToken {
            header: Header::new(self.algorithm()),
            claims,
        }
    }

    /// Sign a token
    ///
    /// # Arguments
    ///
    /// * `token` - Token returned by [`issue`](Self::issue)
    /// * `key` - Optional per-call key; only the symmetric variant honours it
    fn sign<C: Serialize>(&self, token: &UnsignedToken<C>, key: Option<&[u8]>)
        -> DomainResult<String>;

    /// Parse and validate a signed token
    ///
    /// Rejects tokens signed with another method, tokens with a bad
    /// signature and expired tokens.
    fn parse<C: DeserializeOwned>(
        &self,
        signed_string: &str,
        key: Option<&[u8]>,
    ) -> DomainResult<ParsedToken<C>>;
}

/// Validation shared by both variants: exact algorithm, no leeway,
/// `exp` and `sub` required
pub(crate) fn validation_for(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

pub(crate) fn map_jwt_error(err: jsonwebtoken::errors::Error) -> DomainError {
    let token_error = match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::InvalidTokenFormat,
    };
    DomainError::Token(token_error)
}

pub(crate) fn generation_error(err: jsonwebtoken::errors::Error) -> DomainError {
    DomainError::Token(TokenError::TokenGenerationFailed {
        message: err.to_string(),
    })
}
