use std::time::Duration;

use tracing::debug;

use qrfeed_domain::sentiment::{self, SentimentAnalysis};

use crate::domain::repository::SentimentAnalyzer;
use crate::error::FeedbackServiceError;

/// Keyword classifier behind the analyzer port.
///
/// `latency` simulates a remote NLP call. Only the awaiting submission is
/// delayed; nothing is locked while sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSentimentAnalyzer {
    pub latency: Duration,
}

impl KeywordSentimentAnalyzer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl SentimentAnalyzer for KeywordSentimentAnalyzer {
    async fn analyze(&self, text: &str) -> Result<SentimentAnalysis, FeedbackServiceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let result = sentiment::analyze(text);
        debug!(
            sentiment = %result.sentiment,
            score = result.score,
            "classified comment"
        );
        Ok(result)
    }
}
