//! Short-lived tokens for accounts that cannot sign in fully yet

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::domain::entities::token::{
    TemporaryClaims, TEMPORARY_TOKEN_EXPIRY_HOURS, TEMPORARY_TOKEN_SUBJECT,
};
use crate::domain::entities::user::User;
use crate::errors::{DomainResult, TokenError};
use crate::services::signing::{ParsedToken, SigningBackend};

/// Issues and verifies `limited_auth` tokens
///
/// Temporary tokens are never persisted; only the signature, expiry and
/// subject are checked on verification.
pub struct TemporaryTokens<S: SigningBackend> {
    signer: Arc<S>,
}

impl<S: SigningBackend> TemporaryTokens<S> {
    pub fn new(signer: Arc<S>) -> Self {
        Self { signer }
    }

    /// Signs a temporary token for `user` valid for 24 hours
    pub fn issue(&self, user: &User) -> DomainResult<String> {
        let claims = TemporaryClaims {
            sub: TEMPORARY_TOKEN_SUBJECT.to_string(),
            exp: (Utc::now() + Duration::hours(TEMPORARY_TOKEN_EXPIRY_HOURS)).timestamp(),
            uid: user.uid.clone(),
        };

        let signed = self.signer.sign(&self.signer.issue(claims), None)?;
        debug!(uid = %user.uid, "Issued temporary token");
        Ok(signed)
    }

    pub fn verify(&self, signed_string: &str) -> DomainResult<ParsedToken<TemporaryClaims>> {
        let parsed = self.signer.parse::<TemporaryClaims>(signed_string, None)?;

        if parsed.claims.sub != TEMPORARY_TOKEN_SUBJECT {
            return Err(TokenError::InvalidSubject {
                expected: TEMPORARY_TOKEN_SUBJECT.to_string(),
                actual: parsed.claims.sub,
            }
            .into());
        }

        Ok(parsed)
    }
}
