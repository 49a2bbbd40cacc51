use tracing::{debug, info};

use qrfeed_core::clock::Clock;
use qrfeed_domain::id::QrCodeId;

use crate::domain::repository::QrCodeRepository;
use crate::domain::types::{MAX_EXPIRY_HOURS, MAX_SCANS_LIMIT, QrCode, ScanOutcome};
use crate::error::FeedbackServiceError;

// ── IssueQrCode ──────────────────────────────────────────────────────────────

pub struct IssueQrCodeInput {
    pub context: String,
    pub expiry_hours: i64,
    pub max_scans: i64,
}

pub struct IssueQrCodeUseCase<R: QrCodeRepository, C: Clock> {
    pub repo: R,
    pub clock: C,
}

impl<R: QrCodeRepository, C: Clock> IssueQrCodeUseCase<R, C> {
    pub async fn execute(&self, input: IssueQrCodeInput) -> Result<QrCode, FeedbackServiceError> {
        let context = input.context.trim();
        if context.is_empty() {
            return Err(FeedbackServiceError::InvalidContext);
        }
        if !(1..=MAX_EXPIRY_HOURS).contains(&input.expiry_hours) {
            return Err(FeedbackServiceError::InvalidExpiry);
        }
        if !(1..=MAX_SCANS_LIMIT).contains(&input.max_scans) {
            return Err(FeedbackServiceError::InvalidMaxScans);
        }

        let code = QrCode::new(
            context.to_owned(),
            input.expiry_hours as u32,
            input.max_scans as u32,
            self.clock.now(),
        );
        self.repo.create(&code).await?;

        info!(
            qr_id = %code.id,
            context = %code.context,
            expires_at = %code.expires_at,
            max_scans = code.max_scans,
            "issued qr code"
        );
        Ok(code)
    }
}

// ── GetQrCode ────────────────────────────────────────────────────────────────

pub struct GetQrCodeUseCase<R: QrCodeRepository> {
    pub repo: R,
}

impl<R: QrCodeRepository> GetQrCodeUseCase<R> {
    pub async fn execute(&self, id: QrCodeId) -> Result<QrCode, FeedbackServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FeedbackServiceError::QrCodeNotFound)
    }
}

// ── ListQrCodes ──────────────────────────────────────────────────────────────

pub struct ListQrCodesUseCase<R: QrCodeRepository> {
    pub repo: R,
}

impl<R: QrCodeRepository> ListQrCodesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<QrCode>, FeedbackServiceError> {
        self.repo.list().await
    }
}

// ── CheckQrCode (check-and-consume) ──────────────────────────────────────────

pub struct CheckQrCodeUseCase<R: QrCodeRepository, C: Clock> {
    pub repo: R,
    pub clock: C,
}

impl<R: QrCodeRepository, C: Clock> CheckQrCodeUseCase<R, C> {
    /// Consume one scan if the code is still valid. Unknown ids fail closed.
    pub async fn execute(&self, id: QrCodeId) -> Result<ScanOutcome, FeedbackServiceError> {
        let outcome = self.repo.consume_scan(id, self.clock.now()).await?;
        match &outcome {
            ScanOutcome::Accepted(code) => info!(
                qr_id = %id,
                scans_used = code.scans_used,
                max_scans = code.max_scans,
                "qr scan accepted"
            ),
            rejected => debug!(qr_id = %id, reason = rejected.reason(), "qr scan rejected"),
        }
        Ok(outcome)
    }
}
