//! Tests for the token cleanup service

use std::sync::Arc;

use chrono::Duration;

use crate::repositories::TokenRepository;
use crate::services::token::{
    FixedTtlResolver, TokenCleanupConfig, TokenCleanupService, TokenOptions,
};

use super::{setup, test_user};

fn expired() -> TokenOptions {
    TokenOptions::with_ttl_resolver(Arc::new(FixedTtlResolver::new(
        Duration::minutes(-1),
        Duration::minutes(-1),
    )))
}

#[tokio::test]
async fn test_cleanup_deletes_expired_pair() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    service.issue_tokens(&user, &expired()).await.unwrap();
    let valid = service.issue_tokens(&user, &TokenOptions::default()).await.unwrap();

    let cleanup = TokenCleanupService::new(service.clone(), TokenCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.refresh_tokens_deleted, 1);
    assert_eq!(result.access_tokens_deleted, 1);
    assert_eq!(result.total_cleaned(), 2);
    assert_eq!(repository.count().await, 2);
    assert!(service.verify_token(&valid.access_token).await.is_ok());
}

#[tokio::test]
async fn test_cleanup_deletes_expired_refresh_without_access() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    service.issue_refresh_token(&user, &expired()).await.unwrap();

    let cleanup = TokenCleanupService::new(service, TokenCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert_eq!(result.refresh_tokens_deleted, 1);
    assert_eq!(result.access_tokens_deleted, 0);
    assert_eq!(repository.count().await, 0);
}

#[tokio::test]
async fn test_cleanup_keeps_expired_refresh_with_valid_access() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    let refresh = service.issue_refresh_token(&user, &expired()).await.unwrap();
    service
        .issue_access_token(&user, &refresh, &TokenOptions::default())
        .await
        .unwrap();

    let cleanup = TokenCleanupService::new(service, TokenCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert_eq!(result.total_cleaned(), 0);
    assert_eq!(repository.count().await, 2);
}

#[tokio::test]
async fn test_cleanup_deletes_orphaned_access_tokens() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    let refresh = service
        .issue_refresh_token(&user, &TokenOptions::default())
        .await
        .unwrap();
    service
        .issue_access_token(&user, &refresh, &TokenOptions::default())
        .await
        .unwrap();
    repository.delete_by_id(refresh.id).await.unwrap();

    let cleanup = TokenCleanupService::new(service, TokenCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert_eq!(result.orphaned_tokens_deleted, 1);
    assert_eq!(repository.count().await, 0);
}

#[tokio::test]
async fn test_cleanup_disabled() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    service.issue_tokens(&user, &expired()).await.unwrap();

    let config = TokenCleanupConfig {
        enabled: false,
        ..Default::default()
    };
    let cleanup = Arc::new(TokenCleanupService::new(service, config));

    assert_eq!(cleanup.run_cleanup().await.unwrap().total_cleaned(), 0);
    assert!(cleanup.start_background_task().is_none());
    assert_eq!(repository.count().await, 2);
}

#[tokio::test]
async fn test_cleanup_fails_when_store_unavailable() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    repository.set_should_fail(true);

    let cleanup = TokenCleanupService::new(service, TokenCleanupConfig::default());
    assert!(cleanup.run_cleanup().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_runs_first_cycle_immediately() {
    let user = test_user("uid-1");
    let (repository, service) = setup(&[&user]).await;
    service.issue_tokens(&user, &expired()).await.unwrap();

    let cleanup = Arc::new(TokenCleanupService::new(service, TokenCleanupConfig::default()));
    let handle = cleanup.start_background_task().unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    assert_eq!(repository.count().await, 0);
    handle.abort();
}
