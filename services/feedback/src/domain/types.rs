use chrono::{DateTime, Duration, NaiveDate, Utc};

use qrfeed_domain::id::{FeedbackId, QrCodeId};
use qrfeed_domain::rating::Rating;
use qrfeed_domain::sentiment::Sentiment;

/// Upper bound on a QR code's lifetime accepted at issuance.
pub const MAX_EXPIRY_HOURS: i64 = 72;

/// Upper bound on a QR code's scan allowance accepted at issuance.
pub const MAX_SCANS_LIMIT: i64 = 100;

/// Number of entries in the dashboard's recent-feedback table.
pub const DEFAULT_TOP_N: usize = 10;

/// A time- and use-limited QR code gating feedback collection.
#[derive(Debug, Clone, PartialEq)]
pub struct QrCode {
    pub id: QrCodeId,
    pub context: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_scans: u32,
    pub scans_used: u32,
}

impl QrCode {
    pub fn new(context: String, expiry_hours: u32, max_scans: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: QrCodeId::new(),
            context,
            created_at: now,
            expires_at: now + Duration::hours(i64::from(expiry_hours)),
            max_scans,
            scans_used: 0,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_exhausted(&self) -> bool {
        self.scans_used >= self.max_scans
    }

    pub fn scans_remaining(&self) -> u32 {
        self.max_scans.saturating_sub(self.scans_used)
    }

    /// Check validity at `now` and, if valid, consume one scan.
    ///
    /// Invalid codes are left untouched. Callers must hold exclusive access to
    /// the record for the whole call.
    pub fn try_consume(&mut self, now: DateTime<Utc>) -> ScanOutcome {
        if self.is_expired_at(now) {
            return ScanOutcome::Expired;
        }
        if self.is_exhausted() {
            return ScanOutcome::Exhausted;
        }
        self.scans_used += 1;
        ScanOutcome::Accepted(self.clone())
    }
}

/// Result of a check-and-consume against a QR code.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Scan consumed. Carries the code as it is after the increment.
    Accepted(QrCode),
    Expired,
    Exhausted,
    NotFound,
}

impl ScanOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Accepted(_) => "accepted",
            Self::Expired => "expired",
            Self::Exhausted => "exhausted",
            Self::NotFound => "not_found",
        }
    }
}

/// A submitted rating + comment. Immutable once stored.
///
/// `qr_id` is the opaque id the visitor arrived with. It is not checked
/// against issued codes, so orphan ids are stored and never match a code.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: FeedbackId,
    pub qr_id: String,
    pub rating: Rating,
    pub comment: String,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

/// Per-label counts, zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Sentiment counts for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendBucket {
    pub date: NaiveDate,
    pub counts: SentimentCounts,
}

/// Derived dashboard statistics over a filtered feedback set.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: usize,
    pub positive_percentage: u32,
    pub neutral_percentage: u32,
    pub negative_percentage: u32,
    pub average_rating: f64,
    pub distribution: SentimentCounts,
    pub trend: Vec<TrendBucket>,
    pub recent: Vec<Feedback>,
}

/// Pick the question shown above the feedback form from the QR context.
pub fn context_prompt(context: &str) -> &'static str {
    let context = context.to_lowercase();
    if context.contains("restaurant") || context.contains("table") {
        "How was your dining experience?"
    } else if context.contains("classroom") || context.contains("room") {
        "How was your classroom experience?"
    } else {
        "How was your experience?"
    }
}
