//! Login blocker behaviour through the assembled services and in-memory stores

mod common;

use chrono::{Duration, Utc};

use common::{
    active_user, harness_with, hmac_config, login_policy, RecordingDispatcher,
    StaticSettingsProvider,
};
use wu_core::domain::entities::login_security::{AutologoutSettings, BlockedIp};
use wu_core::errors::{AuthError, DomainError};
use wu_shared::config::TokenTtlConfig;

fn auth_error(err: DomainError) -> AuthError {
    match err {
        DomainError::Auth(e) => e,
        other => panic!("expected auth error, got {:?}", other),
    }
}

async fn setup(ip_limit: u64, user_limit: u64, notifications: RecordingDispatcher) -> common::Harness {
    let config = hmac_config(TokenTtlConfig::fixed(300, 3600));
    let settings =
        StaticSettingsProvider::new(login_policy(ip_limit, user_limit), AutologoutSettings::default());
    harness_with(&config, settings, notifications).await
}

#[tokio::test]
async fn test_initial_policy_is_loaded_at_build() {
    let h = setup(3, 5, RecordingDispatcher::default()).await;
    assert_eq!(*h.services.blocker.settings(), login_policy(3, 5));
}

#[tokio::test]
async fn test_ip_is_blocked_after_limit_and_unblocked_after_expiry() {
    let h = setup(3, 0, RecordingDispatcher::default()).await;
    let blocker = &h.services.blocker;
    let ip = "203.0.113.7";

    assert!(blocker.add_ip_fail_attempt(ip).await);
    assert!(blocker.add_ip_fail_attempt(ip).await);
    assert!(blocker.check_ip(ip).await.is_ok());

    // Third attempt blocks and is not recorded
    assert!(!blocker.add_ip_fail_attempt(ip).await);
    assert!(h.fail_attempts.all().await.is_empty());

    let err = blocker.check_ip(ip).await.unwrap_err();
    assert_eq!(auth_error(err), AuthError::IpBlocked { ip: ip.to_string() });
    assert!(blocker.check_ip("203.0.113.8").await.is_ok());

    let record = h.blocked_ips.all().await.remove(0);
    let remaining = record.blocked_until - Utc::now();
    assert!(remaining > Duration::minutes(14) && remaining <= Duration::minutes(15));
}

#[tokio::test]
async fn test_expired_ip_block_is_removed_on_check() {
    let h = setup(3, 0, RecordingDispatcher::default()).await;
    let ip = "198.51.100.1";
    h.blocked_ips
        .insert(BlockedIp::new(ip, Utc::now() - Duration::minutes(1)))
        .await;

    assert!(h.services.blocker.check_ip(ip).await.is_ok());
    assert!(h.blocked_ips.all().await.is_empty());
}

#[tokio::test]
async fn test_user_is_blocked_and_notified() {
    let h = setup(0, 3, RecordingDispatcher::default()).await;
    let user = active_user("uid-victim");
    h.users.save(user.clone()).await;
    let blocker = &h.services.blocker;

    assert!(blocker.add_user_fail_attempt(&user.email, "").await);
    assert!(blocker.add_user_fail_attempt(&user.email, "").await);
    assert!(blocker.check_user(&user.email).await.is_ok());

    assert!(!blocker.add_user_fail_attempt(&user.email, "").await);

    let err = blocker.check_user(&user.phone_number).await.unwrap_err();
    assert_eq!(
        auth_error(err),
        AuthError::UserBlocked {
            username: user.username.clone()
        }
    );
    assert_eq!(h.notifications.notified(), vec![user.uid.clone()]);

    let attempts = h.fail_attempts.all().await;
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| a.impersonated));
}

#[tokio::test]
async fn test_notification_failure_does_not_prevent_block() {
    let h = setup(0, 1, RecordingDispatcher::failing()).await;
    let user = active_user("uid-quiet");
    h.users.save(user.clone()).await;

    assert!(!h.services.blocker.add_user_fail_attempt(&user.email, "").await);

    assert!(h.services.blocker.check_user(&user.email).await.is_err());
    assert_eq!(h.notifications.notified().len(), 1);
}

#[tokio::test]
async fn test_user_attempts_also_count_towards_ip() {
    let h = setup(2, 10, RecordingDispatcher::default()).await;
    let user = active_user("uid-shared");
    h.users.save(user.clone()).await;
    let ip = "192.0.2.50";

    assert!(h.services.blocker.add_user_fail_attempt(&user.email, ip).await);
    assert!(h.services.blocker.add_user_fail_attempt(&user.email, ip).await);

    assert!(h.services.blocker.check_ip(ip).await.is_err());
    assert!(h.services.blocker.check_user(&user.email).await.is_ok());
}

#[tokio::test]
async fn test_unknown_identifier_passes_checks() {
    let h = setup(3, 3, RecordingDispatcher::default()).await;

    assert!(h.services.blocker.check_user("nobody@example.com").await.is_ok());
    assert!(h
        .services
        .blocker
        .check_phone_confirmed("nobody@example.com")
        .await
        .is_ok());
    assert!(!h
        .services
        .blocker
        .add_user_fail_attempt("nobody@example.com", "")
        .await);
}

#[tokio::test]
async fn test_unconfirmed_phone_is_rejected() {
    let h = setup(3, 3, RecordingDispatcher::default()).await;
    let mut user = active_user("uid-unconfirmed");
    user.is_phone_confirmed = false;
    h.users.save(user.clone()).await;

    let err = h
        .services
        .blocker
        .check_phone_confirmed(&user.email)
        .await
        .unwrap_err();
    assert_eq!(
        auth_error(err),
        AuthError::PhoneNotConfirmed {
            username: user.username.clone(),
            phone_number: user.phone_number.clone(),
        }
    );
}

#[tokio::test]
async fn test_clear_all_old_fail_attempts() {
    let h = setup(10, 10, RecordingDispatcher::default()).await;
    let user = active_user("uid-success");
    let other = active_user("uid-other");
    h.users.save(user.clone()).await;
    h.users.save(other.clone()).await;

    assert!(h.services.blocker.add_user_fail_attempt(&user.email, "10.0.0.1").await);
    assert!(h.services.blocker.add_user_fail_attempt(&other.email, "10.0.0.2").await);

    h.services.blocker.clear_all_old_fail_attempts(&user).await;

    let remaining = h.fail_attempts.all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].uid.as_deref(), Some("uid-other"));
}

#[tokio::test]
async fn test_reload_picks_up_new_policy() {
    let h = setup(0, 0, RecordingDispatcher::default()).await;
    let ip = "192.0.2.99";
    assert!(!h.services.blocker.add_ip_fail_attempt(ip).await);

    h.settings.set_login(login_policy(5, 0));
    h.services.blocker.load_settings().await;

    assert!(h.services.blocker.add_ip_fail_attempt(ip).await);
}
