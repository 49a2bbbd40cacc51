//! Sentiment labels and the keyword-counting classifier.
//!
//! The classifier counts which marker words appear anywhere in the lowercased
//! text. Matching is literal substring matching: "loved" matches the marker
//! "love", and "badge" matches "bad". Each marker counts at most once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three-way sentiment label derived from a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Neutral => "NEUTRAL",
            Self::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as a [`Sentiment`].
#[derive(Debug, Error)]
#[error("unknown sentiment: {0:?}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(Self::Positive),
            "NEUTRAL" => Ok(Self::Neutral),
            "NEGATIVE" => Ok(Self::Negative),
            _ => Err(UnknownSentiment(s.to_owned())),
        }
    }
}

/// Classifier output. `score` is a confidence in `[0.5, 1.0]`, not a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    pub score: f64,
}

impl SentimentAnalysis {
    /// Result used when there is no signal, or when classification is unavailable.
    pub const NEUTRAL: Self = Self {
        sentiment: Sentiment::Neutral,
        score: 0.5,
    };
}

pub const POSITIVE_MARKERS: [&str; 9] = [
    "great",
    "good",
    "excellent",
    "amazing",
    "love",
    "happy",
    "satisfied",
    "best",
    "awesome",
];

pub const NEGATIVE_MARKERS: [&str; 9] = [
    "bad",
    "terrible",
    "worst",
    "hate",
    "awful",
    "poor",
    "disappointing",
    "angry",
    "slow",
];

fn count_markers(text: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|m| text.contains(*m)).count()
}

/// Classify `text` by counting positive and negative marker words.
pub fn analyze(text: &str) -> SentimentAnalysis {
    let lower = text.to_lowercase();
    let positive = count_markers(&lower, &POSITIVE_MARKERS);
    let negative = count_markers(&lower, &NEGATIVE_MARKERS);
    let total = (positive + negative) as f64;

    if positive > negative {
        SentimentAnalysis {
            sentiment: Sentiment::Positive,
            score: 0.5 + 0.5 * (positive as f64 / total),
        }
    } else if negative > positive {
        SentimentAnalysis {
            sentiment: Sentiment::Negative,
            score: 0.5 + 0.5 * (negative as f64 / total),
        }
    } else {
        SentimentAnalysis::NEUTRAL
    }
}
