//! Unit tests for the background session cleanup service

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::otp_session::OtpSession;
use crate::services::otp::{
    OtpSessionConfig, SessionCleanupConfig, SessionCleanupService, SessionStore,
};

use super::mocks::manager_with;

const PHONE: &str = "+919876543210";

async fn store_with_stale_session() -> Arc<SessionStore> {
    let store = Arc::new(SessionStore::new());
    let session = OtpSession::new(PHONE.to_string(), Duration::minutes(10), false);
    let id = session.session_id.clone();
    store.insert(session).await;
    store.backdate(&id, Duration::minutes(11)).await;
    store
}

#[tokio::test]
async fn test_run_cleanup_once() {
    let store = store_with_stale_session().await;
    let service = SessionCleanupService::new(
        store.clone(),
        SessionCleanupConfig::default(),
        Duration::minutes(30),
    );

    let result = service.run_cleanup().await;
    assert_eq!(result.expired_pending, 1);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_disabled_cleanup_does_not_start() {
    let store = Arc::new(SessionStore::new());
    let config = SessionCleanupConfig {
        interval_seconds: 300,
        enabled: false,
    };
    let service = Arc::new(SessionCleanupService::new(store, config, Duration::minutes(30)));
    assert!(service.start_background_task().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let store = store_with_stale_session().await;
    let config = SessionCleanupConfig {
        interval_seconds: 60,
        enabled: true,
    };
    let service = Arc::new(SessionCleanupService::new(
        store.clone(),
        config,
        Duration::minutes(30),
    ));

    let handle = service.start_background_task().unwrap();

    // Paused clock advances automatically while the test sleeps
    for _ in 0..10 {
        if store.is_empty().await {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
    }
    assert!(store.is_empty().await);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_task() {
    let config = OtpSessionConfig {
        cleanup: SessionCleanupConfig {
            interval_seconds: 3600,
            enabled: true,
        },
        ..Default::default()
    };
    let (manager, _, _) = manager_with(config);

    let handle = manager.start_cleanup().unwrap();
    assert!(!handle.is_finished());
    handle.shutdown().await;
}
