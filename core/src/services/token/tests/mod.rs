mod cleanup_tests;

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::MockTokenRepository;
use crate::services::signing::HmacSigner;
use crate::services::token::{FixedTtlResolver, TokenService};

pub(super) type TestTokenService = TokenService<MockTokenRepository, HmacSigner>;

pub(super) fn test_user(uid: &str) -> User {
    let mut user = User::new(uid, format!("user-{}", uid));
    user.role_name = "client".to_string();
    user.first_name = "Test".to_string();
    user.last_name = "User".to_string();
    user
}

pub(super) fn signer() -> Arc<HmacSigner> {
    Arc::new(HmacSigner::new(Algorithm::HS256, b"token-service-secret").unwrap())
}

/// Token service with fixed lifetimes of 5 minutes (access) and 1 hour (refresh)
pub(super) async fn setup(users: &[&User]) -> (Arc<MockTokenRepository>, Arc<TestTokenService>) {
    let repository = Arc::new(MockTokenRepository::new());
    for user in users {
        repository.add_user((*user).clone()).await;
    }

    let service = TokenService::new(
        repository.clone(),
        signer(),
        Arc::new(FixedTtlResolver::new(Duration::hours(1), Duration::minutes(5))),
    );

    (repository, Arc::new(service))
}

pub(super) fn token_error(err: DomainError) -> TokenError {
    match err {
        DomainError::Token(e) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}
