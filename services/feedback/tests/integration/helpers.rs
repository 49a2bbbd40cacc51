use std::sync::Arc;
use std::time::Duration;

use qrfeed_domain::sentiment::SentimentAnalysis;
use qrfeed_feedback::config::FeedbackConfig;
use qrfeed_feedback::domain::repository::SentimentAnalyzer;
use qrfeed_feedback::error::FeedbackServiceError;
use qrfeed_feedback::handlers::qr_code::{IssueQrCodeRequest, QrCodeResponse, issue_qr_code};
use qrfeed_feedback::state::AppState;
use qrfeed_testing::clock::ManualClock;
use qrfeed_testing::fixture::reference_now;

// ── State ────────────────────────────────────────────────────────────────────

/// Config with no classification delay and no seeded data.
pub fn test_config() -> FeedbackConfig {
    FeedbackConfig {
        sentiment_latency: Duration::ZERO,
        seed_sample_data: false,
        ..FeedbackConfig::default()
    }
}

/// App state driven by a manual clock starting at `reference_now()`.
pub fn test_state() -> (AppState, ManualClock) {
    let clock = ManualClock::new(reference_now());
    let state = AppState::with_clock(test_config(), Arc::new(clock.clone()));
    (state, clock)
}

pub async fn issue(
    state: &AppState,
    context: &str,
    expiry_hours: i64,
    max_scans: i64,
) -> QrCodeResponse {
    issue_qr_code(
        state,
        IssueQrCodeRequest {
            context: context.to_owned(),
            expiry_hours,
            max_scans,
        },
    )
    .await
    .unwrap()
}

// ── Analyzers ────────────────────────────────────────────────────────────────

/// Classifier whose backend is down.
pub struct FailingAnalyzer;

impl SentimentAnalyzer for FailingAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<SentimentAnalysis, FeedbackServiceError> {
        Err(FeedbackServiceError::ClassificationUnavailable(
            "backend offline".to_owned(),
        ))
    }
}
