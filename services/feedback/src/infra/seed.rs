//! Demo sample data.
//!
//! Seeds the feedback store with records spread over the past week so the
//! dashboard has something to show on a fresh process. Sentiment is derived
//! from the comment like any submitted record.

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use tracing::info;

use qrfeed_domain::id::{FeedbackId, QrCodeId};
use qrfeed_domain::rating::{MAX_RATING, MIN_RATING, Rating};
use qrfeed_domain::sentiment;

use crate::domain::repository::FeedbackRepository;
use crate::domain::types::Feedback;
use crate::error::FeedbackServiceError;

pub const SAMPLE_COMMENTS: [&str; 5] = [
    "Great service, very satisfied!",
    "Food was good, but the wait was a bit long.",
    "Terrible experience, will not return.",
    "Average experience, nothing special.",
    "Loved the atmosphere, but the food was just okay.",
];

const ONE_WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

fn sample_feedback(
    now: DateTime<Utc>,
    count: usize,
) -> Result<Vec<Feedback>, FeedbackServiceError> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let comment = SAMPLE_COMMENTS[rng.random_range(0..SAMPLE_COMMENTS.len())];
            let rating = Rating::new(i64::from(rng.random_range(MIN_RATING..=MAX_RATING)))
                .map_err(|_| FeedbackServiceError::InvalidRating)?;
            Ok(Feedback {
                id: FeedbackId::new(),
                qr_id: QrCodeId::new().to_string(),
                rating,
                comment: comment.to_owned(),
                sentiment: sentiment::analyze(comment).sentiment,
                created_at: now - Duration::milliseconds(rng.random_range(0..ONE_WEEK_MS)),
            })
        })
        .collect()
}

/// Insert `count` random records dated within the week before `now`.
pub async fn seed_sample_feedback<R: FeedbackRepository>(
    repo: &R,
    now: DateTime<Utc>,
    count: usize,
) -> Result<usize, FeedbackServiceError> {
    let records = sample_feedback(now, count)?;
    for record in records {
        repo.insert(record).await?;
    }
    info!(count, "seeded sample feedback");
    Ok(count)
}
