//! Private/public key pair signing for the ECDSA and RSA methods

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DomainError, DomainResult, TokenError};

use super::backend::{
    generation_error, map_jwt_error, sealed, validation_for, ParsedToken, SigningBackend,
    UnsignedToken,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyFamily {
    Ec,
    Rsa,
}

impl KeyFamily {
    fn of(algorithm: Algorithm) -> Option<Self> {
        match algorithm {
            Algorithm::ES256 | Algorithm::ES384 => Some(KeyFamily::Ec),
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => Some(KeyFamily::Rsa),
            _ => None,
        }
    }
}

/// Signs with a private key and verifies with the matching public key
///
/// Per-call keys are ignored: the pair loaded at construction is always used.
#[derive(Clone)]
pub struct KeyPairSigner {
    algorithm: Algorithm,
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    validation: Validation,
    private_key_path: PathBuf,
    public_key_path: PathBuf,
}

impl std::fmt::Debug for KeyPairSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairSigner")
            .field("algorithm", &self.algorithm)
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl KeyPairSigner {
    /// Creates a signer from PEM key files
    ///
    /// # Arguments
    ///
    /// * `algorithm` - ES256, ES384, RS256, RS384 or RS512
    /// * `private_key_path` - Path to the PEM-encoded private key (PKCS#8 for ECDSA)
    /// * `public_key_path` - Path to the PEM-encoded public key
    ///
    /// # Returns
    ///
    /// * `Ok(KeyPairSigner)` - Keys loaded successfully
    /// * `Err(DomainError)` - A file is missing, unreadable, a directory or not a valid key
    pub fn new<P: AsRef<Path>>(
        algorithm: Algorithm,
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let family = Self::family(algorithm)?;
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = read_key_file(&private_key_path, "private")?;
        let public_key_pem = read_key_file(&public_key_path, "public")?;
        let (encoding_key, decoding_key) = parse_keys(family, &private_key_pem, &public_key_pem)?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            validation: validation_for(algorithm),
            private_key_path,
            public_key_path,
        })
    }

    /// Creates a signer from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        algorithm: Algorithm,
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        let family = Self::family(algorithm)?;
        let (encoding_key, decoding_key) = parse_keys(
            family,
            private_key_pem.as_bytes(),
            public_key_pem.as_bytes(),
        )?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            validation: validation_for(algorithm),
            private_key_path: PathBuf::from("memory"),
            public_key_path: PathBuf::from("memory"),
        })
    }

    /// Returns the paths to the key files
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }

    fn family(algorithm: Algorithm) -> Result<KeyFamily, DomainError> {
        KeyFamily::of(algorithm).ok_or_else(|| DomainError::Configuration {
            message: format!("{:?} is not a key pair signing method", algorithm),
        })
    }
}

fn key_load_error(message: String) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError { message })
}

fn read_key_file(path: &Path, kind: &str) -> Result<Vec<u8>, DomainError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => key_load_error(format!(
            "{} key file {} does not exist",
            kind,
            path.display()
        )),
        IoErrorKind::PermissionDenied => key_load_error(format!(
            "failed to read {} key file {}: permission denied",
            kind,
            path.display()
        )),
        _ => key_load_error(format!(
            "failed to read {} key file {}: {}",
            kind,
            path.display(),
            e
        )),
    })?;

    if metadata.is_dir() {
        return Err(key_load_error(format!(
            "{} is a directory, expected {} key file",
            path.display(),
            kind
        )));
    }

    fs::read(path).map_err(|e| {
        key_load_error(format!(
            "failed to read {} key file {}: {}",
            kind,
            path.display(),
            e
        ))
    })
}

fn parse_keys(
    family: KeyFamily,
    private_key_pem: &[u8],
    public_key_pem: &[u8],
) -> Result<(EncodingKey, DecodingKey), DomainError> {
    let encoding_key = match family {
        KeyFamily::Ec => EncodingKey::from_ec_pem(private_key_pem),
        KeyFamily::Rsa => EncodingKey::from_rsa_pem(private_key_pem),
    }
    .map_err(|e| key_load_error(format!("Invalid private key format: {}", e)))?;

    let decoding_key = match family {
        KeyFamily::Ec => DecodingKey::from_ec_pem(public_key_pem),
        KeyFamily::Rsa => DecodingKey::from_rsa_pem(public_key_pem),
    }
    .map_err(|e| key_load_error(format!("Invalid public key format: {}", e)))?;

    Ok((encoding_key, decoding_key))
}

impl sealed::Sealed for KeyPairSigner {}

impl SigningBackend for KeyPairSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign<C: Serialize>(
        &self,
        token: &UnsignedToken<C>,
        _key: Option<&[u8]>,
    ) -> DomainResult<String> {
        encode(&token.header, &token.claims, &self.encoding_key).map_err(generation_error)
    }

    fn parse<C: DeserializeOwned>(
        &self,
        signed_string: &str,
        _key: Option<&[u8]>,
    ) -> DomainResult<ParsedToken<C>> {
        decode(signed_string, &self.decoding_key, &self.validation).map_err(map_jwt_error)
    }
}
