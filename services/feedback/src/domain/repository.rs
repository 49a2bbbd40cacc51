#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use qrfeed_domain::id::{FeedbackId, QrCodeId};
use qrfeed_domain::sentiment::{Sentiment, SentimentAnalysis};

use crate::domain::types::{Feedback, QrCode, ScanOutcome};
use crate::error::FeedbackServiceError;

/// Registry of issued QR codes.
pub trait QrCodeRepository: Send + Sync {
    async fn create(&self, code: &QrCode) -> Result<(), FeedbackServiceError>;

    async fn find_by_id(&self, id: QrCodeId) -> Result<Option<QrCode>, FeedbackServiceError>;

    /// All codes in issuance order.
    async fn list(&self) -> Result<Vec<QrCode>, FeedbackServiceError>;

    /// Check validity at `now` and consume one scan in a single atomic step.
    ///
    /// Concurrent callers against the same id must never see more `Accepted`
    /// outcomes than the code's `max_scans`.
    async fn consume_scan(
        &self,
        id: QrCodeId,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, FeedbackServiceError>;
}

/// Append-only feedback store.
pub trait FeedbackRepository: Send + Sync {
    /// Publish a fully constructed record.
    async fn insert(&self, feedback: Feedback) -> Result<(), FeedbackServiceError>;

    async fn find_by_id(&self, id: FeedbackId)
    -> Result<Option<Feedback>, FeedbackServiceError>;

    /// All records in insertion order.
    async fn list_all(&self) -> Result<Vec<Feedback>, FeedbackServiceError>;

    /// Exact match on the stored opaque id.
    async fn list_by_qr_id(&self, qr_id: &str) -> Result<Vec<Feedback>, FeedbackServiceError>;

    async fn list_by_sentiment(
        &self,
        sentiment: Sentiment,
    ) -> Result<Vec<Feedback>, FeedbackServiceError>;

    /// Newest `count` records by `created_at`; ties go to the later insert.
    async fn list_recent(&self, count: usize) -> Result<Vec<Feedback>, FeedbackServiceError>;
}

/// Port for classifying comment text.
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<SentimentAnalysis, FeedbackServiceError>;
}
