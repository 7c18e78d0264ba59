//! Resolution state machine tests over the full service stack with
//! in-memory repositories.

mod common;

use chrono::{Duration, Utc};
use linktrace::application::services::VisitMeta;
use linktrace::domain::entities::Link;
use linktrace::error::AppError;

#[tokio::test]
async fn test_create_then_resolve_round_trip() {
    let mut harness = common::test_harness();

    let link = harness
        .state
        .link_service
        .create_link(
            "user-1".to_string(),
            "https://example.com/target".to_string(),
            None,
            None,
        )
        .await
        .unwrap();

    let url = harness
        .state
        .resolver_service
        .resolve(&link.code, VisitMeta::default(), Utc::now())
        .await
        .unwrap();

    assert_eq!(url, "https://example.com/target");
    assert_eq!(harness.links.get(link.id).unwrap().click_count, 1);

    let event = harness.click_rx.try_recv().unwrap();
    assert_eq!(event.link_id, link.id);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let harness = common::test_harness();

    let result = harness
        .state
        .resolver_service
        .resolve("missing", VisitMeta::default(), Utc::now())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_link_without_expiry_never_expires() {
    let harness = common::test_harness();

    let link = harness
        .state
        .link_service
        .create_link(
            "user-1".to_string(),
            "https://example.com".to_string(),
            None,
            None,
        )
        .await
        .unwrap();

    let far_future = Utc::now() + Duration::days(365 * 100);
    let result = harness
        .state
        .resolver_service
        .resolve(&link.code, VisitMeta::default(), far_future)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_expiry_latches_link_inactive() {
    let harness = common::test_harness();
    let now = Utc::now();

    harness.links.seed(Link::new(
        1,
        "stale".to_string(),
        "https://example.com/".to_string(),
        "user-1".to_string(),
        0,
        now - Duration::days(2),
        Some(now - Duration::hours(1)),
        true,
    ));

    let err = harness
        .state
        .resolver_service
        .resolve("stale", VisitMeta::default(), now)
        .await
        .unwrap_err();
    match err {
        AppError::Gone { details, .. } => assert_eq!(details["state"], "expired"),
        other => panic!("expected Gone, got {other:?}"),
    }

    assert!(!harness.links.get(1).unwrap().is_active);

    // A clock reading from before the expiry no longer reactivates it.
    let err = harness
        .state
        .resolver_service
        .resolve("stale", VisitMeta::default(), now - Duration::days(1))
        .await
        .unwrap_err();
    match err {
        AppError::Gone { details, .. } => assert_eq!(details["state"], "inactive"),
        other => panic!("expected Gone, got {other:?}"),
    }

    // Refused resolutions never count as clicks.
    assert_eq!(harness.links.get(1).unwrap().click_count, 0);
}

#[tokio::test]
async fn test_concurrent_resolutions_count_exactly_once_each() {
    const CONCURRENCY: usize = 20;

    let mut harness = common::test_harness();

    let link = harness
        .state
        .link_service
        .create_link(
            "user-1".to_string(),
            "https://example.com".to_string(),
            None,
            None,
        )
        .await
        .unwrap();

    let mut tasks = Vec::with_capacity(CONCURRENCY);
    for _ in 0..CONCURRENCY {
        let state = harness.state.clone();
        let code = link.code.clone();
        tasks.push(tokio::spawn(async move {
            state
                .resolver_service
                .resolve(&code, VisitMeta::default(), Utc::now())
                .await
        }));
    }

    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }

    assert_eq!(
        harness.links.get(link.id).unwrap().click_count,
        CONCURRENCY as i64
    );

    let mut events = 0;
    while harness.click_rx.try_recv().is_ok() {
        events += 1;
    }
    assert_eq!(events, CONCURRENCY);
}
