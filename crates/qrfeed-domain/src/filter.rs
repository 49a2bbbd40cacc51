//! Dashboard filter criteria.

use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sentiment::Sentiment;

/// Sentiment selector for the dashboard. `All` disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentFilter {
    #[default]
    All,
    Positive,
    Neutral,
    Negative,
}

impl SentimentFilter {
    pub fn matches(self, sentiment: Sentiment) -> bool {
        match self {
            Self::All => true,
            Self::Positive => sentiment == Sentiment::Positive,
            Self::Neutral => sentiment == Sentiment::Neutral,
            Self::Negative => sentiment == Sentiment::Negative,
        }
    }
}

/// Error returned when a filter value cannot be parsed.
#[derive(Debug, Error)]
#[error("unknown filter value: {0:?}")]
pub struct UnknownFilter(pub String);

impl FromStr for SentimentFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(UnknownFilter(s.to_owned())),
        }
    }
}

/// Look-back window measured from the evaluation time.
///
/// - `Day`: 24 hours
/// - `Week`: 7 days (dashboard default)
/// - `Month`: 30 days
/// - `All`: unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
    Month,
    All,
}

impl TimeWindow {
    /// Window length, or `None` for `All`.
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Day => Some(Duration::hours(24)),
            Self::Week => Some(Duration::days(7)),
            Self::Month => Some(Duration::days(30)),
            Self::All => None,
        }
    }
}

impl FromStr for TimeWindow {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            _ => Err(UnknownFilter(s.to_owned())),
        }
    }
}
