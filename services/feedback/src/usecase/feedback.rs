use std::time::Duration;

use tracing::{info, warn};

use qrfeed_core::clock::Clock;
use qrfeed_domain::id::FeedbackId;
use qrfeed_domain::rating::Rating;
use qrfeed_domain::sentiment::{Sentiment, SentimentAnalysis};

use crate::domain::repository::{FeedbackRepository, SentimentAnalyzer};
use crate::domain::types::Feedback;
use crate::error::FeedbackServiceError;

// ── SubmitFeedback ───────────────────────────────────────────────────────────

pub struct SubmitFeedbackInput {
    /// Stored as given; not required to name an issued code.
    pub qr_id: String,
    pub rating: i64,
    pub comment: String,
}

pub struct SubmitFeedbackUseCase<F, A, C>
where
    F: FeedbackRepository,
    A: SentimentAnalyzer,
    C: Clock,
{
    pub feedback: F,
    pub analyzer: A,
    pub clock: C,
    /// Upper bound on the classification call before falling back to neutral.
    pub classify_timeout: Duration,
}

impl<F, A, C> SubmitFeedbackUseCase<F, A, C>
where
    F: FeedbackRepository,
    A: SentimentAnalyzer,
    C: Clock,
{
    pub async fn execute(&self, input: SubmitFeedbackInput) -> Result<Feedback, FeedbackServiceError> {
        let rating = Rating::new(input.rating).map_err(|_| FeedbackServiceError::InvalidRating)?;

        let analysis = self.classify(&input.comment).await;

        let feedback = Feedback {
            id: FeedbackId::new(),
            qr_id: input.qr_id,
            rating,
            comment: input.comment,
            sentiment: analysis.sentiment,
            created_at: self.clock.now(),
        };
        self.feedback.insert(feedback.clone()).await?;

        info!(
            feedback_id = %feedback.id,
            qr_id = %feedback.qr_id,
            rating = %feedback.rating,
            sentiment = %feedback.sentiment,
            "feedback submitted"
        );
        Ok(feedback)
    }

    /// Classification is best effort: failures and timeouts degrade to neutral
    /// so that capturing the feedback is never blocked.
    async fn classify(&self, comment: &str) -> SentimentAnalysis {
        match tokio::time::timeout(self.classify_timeout, self.analyzer.analyze(comment)).await {
            Ok(Ok(analysis)) => analysis,
            Ok(Err(e)) => {
                warn!(error = %e, "sentiment classification failed, using neutral");
                SentimentAnalysis::NEUTRAL
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.classify_timeout.as_millis() as u64,
                    "sentiment classification timed out, using neutral"
                );
                SentimentAnalysis::NEUTRAL
            }
        }
    }
}

// ── GetFeedback ──────────────────────────────────────────────────────────────

pub struct GetFeedbackUseCase<F: FeedbackRepository> {
    pub feedback: F,
}

impl<F: FeedbackRepository> GetFeedbackUseCase<F> {
    pub async fn execute(&self, id: FeedbackId) -> Result<Feedback, FeedbackServiceError> {
        self.feedback
            .find_by_id(id)
            .await?
            .ok_or(FeedbackServiceError::FeedbackNotFound)
    }
}

// ── ListFeedback ─────────────────────────────────────────────────────────────

/// Selection for [`ListFeedbackUseCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackQuery {
    All,
    ByQrCode(String),
    BySentiment(Sentiment),
    Recent(usize),
}

pub struct ListFeedbackUseCase<F: FeedbackRepository> {
    pub feedback: F,
}

impl<F: FeedbackRepository> ListFeedbackUseCase<F> {
    pub async fn execute(&self, query: FeedbackQuery) -> Result<Vec<Feedback>, FeedbackServiceError> {
        match query {
            FeedbackQuery::All => self.feedback.list_all().await,
            FeedbackQuery::ByQrCode(qr_id) => self.feedback.list_by_qr_id(&qr_id).await,
            FeedbackQuery::BySentiment(sentiment) => {
                self.feedback.list_by_sentiment(sentiment).await
            }
            FeedbackQuery::Recent(count) => self.feedback.list_recent(count).await,
        }
    }
}
