use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use qrfeed_domain::filter::{SentimentFilter, TimeWindow};

use crate::domain::types::{DashboardSummary, SentimentCounts};
use crate::error::FeedbackServiceError;
use crate::handlers::feedback::FeedbackResponse;
use crate::state::AppState;
use crate::usecase::dashboard::{FeedbackFilter, GetDashboardUseCase};

/// Raw filter parameters as they arrive from the dashboard controls.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub sentiment: Option<String>,
    pub search: Option<String>,
    pub window: Option<String>,
}

impl DashboardQuery {
    fn into_filter(self) -> Result<FeedbackFilter, FeedbackServiceError> {
        let sentiment = match self.sentiment.as_deref() {
            Some(raw) => raw
                .parse::<SentimentFilter>()
                .map_err(|_| FeedbackServiceError::InvalidFilter(format!("sentiment={raw}")))?,
            None => SentimentFilter::default(),
        };
        let window = match self.window.as_deref() {
            Some(raw) => raw
                .parse::<TimeWindow>()
                .map_err(|_| FeedbackServiceError::InvalidFilter(format!("window={raw}")))?,
            None => TimeWindow::default(),
        };
        Ok(FeedbackFilter {
            sentiment,
            search: self.search,
            window,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SentimentCountsResponse {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl From<SentimentCounts> for SentimentCountsResponse {
    fn from(counts: SentimentCounts) -> Self {
        Self {
            positive: counts.positive,
            neutral: counts.neutral,
            negative: counts.negative,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrendPointResponse {
    /// UTC calendar day.
    #[serde(serialize_with = "qrfeed_core::serde::to_iso_date")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counts: SentimentCountsResponse,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total: usize,
    pub positive_percentage: u32,
    pub neutral_percentage: u32,
    pub negative_percentage: u32,
    pub average_rating: f64,
    pub distribution: SentimentCountsResponse,
    pub trend: Vec<TrendPointResponse>,
    pub recent: Vec<FeedbackResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total: summary.total,
            positive_percentage: summary.positive_percentage,
            neutral_percentage: summary.neutral_percentage,
            negative_percentage: summary.negative_percentage,
            average_rating: summary.average_rating,
            distribution: summary.distribution.into(),
            trend: summary
                .trend
                .into_iter()
                .map(|bucket| TrendPointResponse {
                    date: bucket.date,
                    counts: bucket.counts.into(),
                })
                .collect(),
            recent: summary
                .recent
                .into_iter()
                .map(FeedbackResponse::from)
                .collect(),
        }
    }
}

pub async fn get_dashboard(
    state: &AppState,
    query: DashboardQuery,
) -> Result<DashboardResponse, FeedbackServiceError> {
    let filter = query.into_filter()?;
    let usecase = GetDashboardUseCase {
        feedback: state.feedback_repo(),
        clock: state.clock(),
        top_n: state.config.dashboard_top_n,
    };
    let summary = usecase.execute(&filter).await?;
    Ok(summary.into())
}
