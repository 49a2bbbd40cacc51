use chrono::Duration;
use tokio::task::JoinSet;

use qrfeed_feedback::error::FeedbackServiceError;
use qrfeed_feedback::handlers::qr_code::{
    IssueQrCodeRequest, check_qr_code, get_qr_code, issue_qr_code, list_qr_codes,
};
use qrfeed_testing::fixture::reference_now;

use crate::helpers::{issue, test_state};

#[tokio::test]
async fn should_issue_code_with_feedback_link() {
    let (state, _clock) = test_state();

    let code = issue(&state, "Table 1", 24, 2).await;

    assert_eq!(code.context, "Table 1");
    assert_eq!(code.created_at, reference_now());
    assert_eq!(code.expires_at, reference_now() + Duration::hours(24));
    assert_eq!(code.max_scans, 2);
    assert_eq!(code.scans_used, 0);
    assert_eq!(
        code.feedback_url,
        format!("http://localhost:8080/feedback/{}", code.id)
    );
}

#[tokio::test]
async fn should_reject_invalid_issuance_without_storing() {
    let (state, _clock) = test_state();

    for (context, expiry_hours, max_scans, expected) in [
        ("Table 1", 0, 2, "INVALID_EXPIRY"),
        ("Table 1", 73, 2, "INVALID_EXPIRY"),
        ("Table 1", 24, 0, "INVALID_MAX_SCANS"),
        ("Table 1", 24, 101, "INVALID_MAX_SCANS"),
        ("   ", 24, 2, "INVALID_CONTEXT"),
    ] {
        let err = issue_qr_code(
            &state,
            IssueQrCodeRequest {
                context: context.to_owned(),
                expiry_hours,
                max_scans,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), expected, "{context:?} {expiry_hours} {max_scans}");
    }

    assert!(list_qr_codes(&state).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_accept_scans_until_limit_reached() {
    let (state, _clock) = test_state();
    let code = issue(&state, "Table 1", 24, 2).await;
    let id = code.id.to_string();

    let first = check_qr_code(&state, &id).await.unwrap();
    assert!(first.valid);
    assert_eq!(first.scans_remaining, Some(1));
    assert_eq!(first.prompt, Some("How was your dining experience?"));

    let second = check_qr_code(&state, &id).await.unwrap();
    assert!(second.valid);
    assert_eq!(second.scans_remaining, Some(0));

    let third = check_qr_code(&state, &id).await.unwrap();
    assert!(!third.valid);
    assert_eq!(third.reason, "exhausted");
    assert_eq!(third.context, None);

    let stored = get_qr_code(&state, &id).await.unwrap();
    assert_eq!(stored.scans_used, 2, "rejected scans must not be counted");
}

#[tokio::test]
async fn should_reject_scan_after_expiry() {
    let (state, clock) = test_state();
    let code = issue(&state, "Classroom 3B", 1, 10).await;
    let id = code.id.to_string();

    clock.advance(Duration::hours(1));
    let at_expiry = check_qr_code(&state, &id).await.unwrap();
    assert!(at_expiry.valid, "code is still valid at its expiry instant");
    assert_eq!(at_expiry.prompt, Some("How was your classroom experience?"));

    clock.advance(Duration::milliseconds(1));
    let after = check_qr_code(&state, &id).await.unwrap();
    assert!(!after.valid);
    assert_eq!(after.reason, "expired");

    let stored = get_qr_code(&state, &id).await.unwrap();
    assert_eq!(stored.scans_used, 1);
}

#[tokio::test]
async fn should_report_expired_before_exhausted() {
    let (state, clock) = test_state();
    let code = issue(&state, "Lobby", 1, 1).await;
    let id = code.id.to_string();

    assert!(check_qr_code(&state, &id).await.unwrap().valid);
    clock.advance(Duration::hours(2));

    let check = check_qr_code(&state, &id).await.unwrap();
    assert_eq!(check.reason, "expired");
}

#[tokio::test]
async fn should_fail_closed_for_unknown_or_malformed_ids() {
    let (state, _clock) = test_state();
    issue(&state, "Table 1", 24, 2).await;

    let unknown = check_qr_code(&state, &uuid::Uuid::new_v4().to_string())
        .await
        .unwrap();
    assert!(!unknown.valid);
    assert_eq!(unknown.reason, "not_found");

    let malformed = check_qr_code(&state, "not-a-qr-id").await.unwrap();
    assert!(!malformed.valid);
    assert_eq!(malformed.reason, "not_found");

    let err = get_qr_code(&state, "not-a-qr-id").await.unwrap_err();
    assert!(matches!(err, FeedbackServiceError::QrCodeNotFound));
}

#[tokio::test]
async fn should_list_codes_in_issuance_order_without_side_effects() {
    let (state, _clock) = test_state();
    let a = issue(&state, "Table 1", 24, 2).await;
    let b = issue(&state, "Table 2", 24, 2).await;

    let first: Vec<_> = list_qr_codes(&state).await.unwrap().into_iter().map(|c| c.id).collect();
    let second: Vec<_> = list_qr_codes(&state).await.unwrap().into_iter().map(|c| c.id).collect();

    assert_eq!(first, vec![a.id, b.id]);
    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_accept_exactly_max_scans_under_concurrent_checks() {
    let (state, _clock) = test_state();
    let code = issue(&state, "Table 1", 24, 3).await;
    let id = code.id.to_string();

    let mut tasks = JoinSet::new();
    for _ in 0..32 {
        let state = state.clone();
        let id = id.clone();
        tasks.spawn(async move { check_qr_code(&state, &id).await.unwrap().valid });
    }

    let mut accepted = 0;
    while let Some(valid) = tasks.join_next().await {
        if valid.unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 3);
    let stored = get_qr_code(&state, &id).await.unwrap();
    assert_eq!(stored.scans_used, 3);
}
