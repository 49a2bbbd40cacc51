use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qrfeed_domain::id::FeedbackId;
use qrfeed_domain::rating::Rating;
use qrfeed_domain::sentiment::Sentiment;

use crate::domain::types::Feedback;
use crate::error::FeedbackServiceError;
use crate::state::AppState;
use crate::usecase::feedback::{
    FeedbackQuery, GetFeedbackUseCase, ListFeedbackUseCase, SubmitFeedbackInput,
    SubmitFeedbackUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: FeedbackId,
    pub qr_id: String,
    pub rating: Rating,
    pub comment: String,
    pub sentiment: Sentiment,
    #[serde(serialize_with = "qrfeed_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            qr_id: feedback.qr_id,
            rating: feedback.rating,
            comment: feedback.comment,
            sentiment: feedback.sentiment,
            created_at: feedback.created_at,
        }
    }
}

// ── Submit ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub qr_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

pub async fn submit_feedback(
    state: &AppState,
    body: SubmitFeedbackRequest,
) -> Result<FeedbackResponse, FeedbackServiceError> {
    let usecase = SubmitFeedbackUseCase {
        feedback: state.feedback_repo(),
        analyzer: state.sentiment_analyzer(),
        clock: state.clock(),
        classify_timeout: state.config.sentiment_timeout,
    };
    let feedback = usecase
        .execute(SubmitFeedbackInput {
            qr_id: body.qr_id,
            rating: body.rating,
            comment: body.comment,
        })
        .await?;
    Ok(feedback.into())
}

// ── Lookup ───────────────────────────────────────────────────────────────────

pub async fn get_feedback(
    state: &AppState,
    feedback_id: &str,
) -> Result<FeedbackResponse, FeedbackServiceError> {
    let id: FeedbackId = feedback_id
        .parse()
        .map_err(|_| FeedbackServiceError::FeedbackNotFound)?;
    let usecase = GetFeedbackUseCase {
        feedback: state.feedback_repo(),
    };
    Ok(usecase.execute(id).await?.into())
}

async fn list(
    state: &AppState,
    query: FeedbackQuery,
) -> Result<Vec<FeedbackResponse>, FeedbackServiceError> {
    let usecase = ListFeedbackUseCase {
        feedback: state.feedback_repo(),
    };
    let items = usecase.execute(query).await?;
    Ok(items.into_iter().map(FeedbackResponse::from).collect())
}

pub async fn list_qr_feedback(
    state: &AppState,
    qr_id: &str,
) -> Result<Vec<FeedbackResponse>, FeedbackServiceError> {
    list(state, FeedbackQuery::ByQrCode(qr_id.to_owned())).await
}

pub async fn list_recent_feedback(
    state: &AppState,
    count: usize,
) -> Result<Vec<FeedbackResponse>, FeedbackServiceError> {
    list(state, FeedbackQuery::Recent(count)).await
}

pub async fn list_feedback_by_sentiment(
    state: &AppState,
    sentiment: &str,
) -> Result<Vec<FeedbackResponse>, FeedbackServiceError> {
    let sentiment: Sentiment = sentiment
        .parse()
        .map_err(|_| FeedbackServiceError::InvalidFilter(format!("sentiment={sentiment}")))?;
    list(state, FeedbackQuery::BySentiment(sentiment)).await
}

pub async fn list_all_feedback(
    state: &AppState,
) -> Result<Vec<FeedbackResponse>, FeedbackServiceError> {
    list(state, FeedbackQuery::All).await
}
