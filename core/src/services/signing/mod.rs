//! JWT signing backends
//!
//! One signing method is chosen at startup:
//! - HMAC methods sign and verify with a shared secret
//! - ECDSA and RSA methods sign with a private key and verify with a public key

mod backend;
mod hmac;
mod key_pair;
mod signer;


pub use backend::{ParsedToken, SigningBackend, UnsignedToken};
pub use hmac::HmacSigner;
pub use key_pair::KeyPairSigner;
pub use signer::{algorithm_for, Signer};
