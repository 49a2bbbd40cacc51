use std::sync::Arc;

use qrfeed_core::clock::{Clock, SystemClock};

use crate::config::FeedbackConfig;
use crate::infra::memory::{MemoryFeedbackRepository, MemoryQrCodeRepository};
use crate::infra::sentiment::KeywordSentimentAnalyzer;

/// Shared application state passed to every handler.
///
/// Built once per process; clones share the same stores.
#[derive(Clone)]
pub struct AppState {
    pub qr_codes: MemoryQrCodeRepository,
    pub feedback: MemoryFeedbackRepository,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<FeedbackConfig>,
}

impl AppState {
    pub fn new(config: FeedbackConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: FeedbackConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            qr_codes: MemoryQrCodeRepository::new(),
            feedback: MemoryFeedbackRepository::new(),
            clock,
            config: Arc::new(config),
        }
    }

    pub fn qr_code_repo(&self) -> MemoryQrCodeRepository {
        self.qr_codes.clone()
    }

    pub fn feedback_repo(&self) -> MemoryFeedbackRepository {
        self.feedback.clone()
    }

    pub fn sentiment_analyzer(&self) -> KeywordSentimentAnalyzer {
        KeywordSentimentAnalyzer::new(self.config.sentiment_latency)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}
