use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use qrfeed_core::clock::Clock;
use qrfeed_domain::filter::{SentimentFilter, TimeWindow};
use qrfeed_domain::sentiment::Sentiment;

use crate::domain::repository::FeedbackRepository;
use crate::domain::types::{DashboardSummary, Feedback, SentimentCounts, TrendBucket};
use crate::error::FeedbackServiceError;

/// Dashboard filter criteria. Defaults to all sentiments over the last week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub sentiment: SentimentFilter,
    /// Case-insensitive substring matched against comment or qr id. Matched
    /// as given; an empty term matches everything.
    pub search: Option<String>,
    pub window: TimeWindow,
}

impl FeedbackFilter {
    pub fn matches(&self, feedback: &Feedback, now: DateTime<Utc>) -> bool {
        if !self.sentiment.matches(feedback.sentiment) {
            return false;
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let in_comment = feedback.comment.to_lowercase().contains(&term);
            let in_qr_id = feedback.qr_id.to_lowercase().contains(&term);
            if !in_comment && !in_qr_id {
                return false;
            }
        }
        match self.window.duration() {
            Some(window) => feedback.created_at >= now - window,
            None => true,
        }
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64).round() as u32
}

fn average_rating(feedback: &[&Feedback]) -> f64 {
    if feedback.is_empty() {
        return 0.0;
    }
    let sum: u32 = feedback.iter().map(|f| u32::from(f.rating.get())).sum();
    let mean = f64::from(sum) / feedback.len() as f64;
    (mean * 10.0).round() / 10.0
}

fn trend(feedback: &[&Feedback]) -> Vec<TrendBucket> {
    let mut by_date: BTreeMap<NaiveDate, SentimentCounts> = BTreeMap::new();
    for f in feedback {
        by_date
            .entry(f.created_at.date_naive())
            .or_default()
            .record(f.sentiment);
    }
    by_date
        .into_iter()
        .map(|(date, counts)| TrendBucket { date, counts })
        .collect()
}

/// Derive dashboard statistics from `feedback` as seen at `now`.
///
/// Pure: the same inputs always produce the same summary. Trend buckets are
/// UTC calendar days.
pub fn summarize(
    feedback: &[Feedback],
    filter: &FeedbackFilter,
    now: DateTime<Utc>,
    top_n: usize,
) -> DashboardSummary {
    let filtered: Vec<&Feedback> = feedback.iter().filter(|f| filter.matches(f, now)).collect();
    let total = filtered.len();

    let mut distribution = SentimentCounts::default();
    for f in &filtered {
        distribution.record(f.sentiment);
    }

    let mut recent: Vec<&Feedback> = filtered.iter().rev().copied().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(top_n);

    DashboardSummary {
        total,
        positive_percentage: percentage(distribution.get(Sentiment::Positive), total),
        neutral_percentage: percentage(distribution.get(Sentiment::Neutral), total),
        negative_percentage: percentage(distribution.get(Sentiment::Negative), total),
        average_rating: average_rating(&filtered),
        distribution,
        trend: trend(&filtered),
        recent: recent.into_iter().cloned().collect(),
    }
}

// ── GetDashboard ─────────────────────────────────────────────────────────────

pub struct GetDashboardUseCase<F: FeedbackRepository, C: Clock> {
    pub feedback: F,
    pub clock: C,
    pub top_n: usize,
}

impl<F: FeedbackRepository, C: Clock> GetDashboardUseCase<F, C> {
    /// Recompute the summary from the current store contents.
    pub async fn execute(
        &self,
        filter: &FeedbackFilter,
    ) -> Result<DashboardSummary, FeedbackServiceError> {
        let all = self.feedback.list_all().await?;
        Ok(summarize(&all, filter, self.clock.now(), self.top_n))
    }
}
