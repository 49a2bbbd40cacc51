/// Feedback service error variants.
///
/// Validation and not-found errors are returned to the caller as-is; the
/// rendering layer decides how to present them. QR expiry is not an error,
/// see [`ScanOutcome`](crate::domain::types::ScanOutcome).
#[derive(Debug, thiserror::Error)]
pub enum FeedbackServiceError {
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    #[error("expiry must be between 1 and 72 hours")]
    InvalidExpiry,
    #[error("max scans must be between 1 and 100")]
    InvalidMaxScans,
    #[error("context must not be empty")]
    InvalidContext,
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
    #[error("qr code not found")]
    QrCodeNotFound,
    #[error("feedback not found")]
    FeedbackNotFound,
    #[error("sentiment classification unavailable: {0}")]
    ClassificationUnavailable(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FeedbackServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidExpiry => "INVALID_EXPIRY",
            Self::InvalidMaxScans => "INVALID_MAX_SCANS",
            Self::InvalidContext => "INVALID_CONTEXT",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::QrCodeNotFound => "QR_CODE_NOT_FOUND",
            Self::FeedbackNotFound => "FEEDBACK_NOT_FOUND",
            Self::ClassificationUnavailable(_) => "CLASSIFICATION_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRating
                | Self::InvalidExpiry
                | Self::InvalidMaxScans
                | Self::InvalidContext
                | Self::InvalidFilter(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::QrCodeNotFound | Self::FeedbackNotFound)
    }

    /// Process exit status for a failed run: 2 for rejected input, 3 for a
    /// missing record, 1 for anything else.
    pub fn exit_code(&self) -> u8 {
        if self.is_validation() {
            2
        } else if self.is_not_found() {
            3
        } else {
            1
        }
    }

    /// JSON body for the rendering layer: `{ "kind": ..., "message": ... }`.
    ///
    /// Internal errors are logged here with their full cause chain.
    pub fn to_body(&self) -> serde_json::Value {
        if let Self::Internal(e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        })
    }
}
