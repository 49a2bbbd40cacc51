use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qrfeed_domain::id::QrCodeId;

use crate::domain::types::{QrCode, ScanOutcome, context_prompt};
use crate::error::FeedbackServiceError;
use crate::state::AppState;
use crate::usecase::qr_code::{
    CheckQrCodeUseCase, GetQrCodeUseCase, IssueQrCodeInput, IssueQrCodeUseCase,
    ListQrCodesUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    pub id: QrCodeId,
    pub context: String,
    #[serde(serialize_with = "qrfeed_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "qrfeed_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub max_scans: u32,
    pub scans_used: u32,
    pub feedback_url: String,
}

impl QrCodeResponse {
    fn from_code(code: QrCode, state: &AppState) -> Self {
        Self {
            feedback_url: state.config.feedback_url(code.id),
            id: code.id,
            context: code.context,
            created_at: code.created_at,
            expires_at: code.expires_at,
            max_scans: code.max_scans,
            scans_used: code.scans_used,
        }
    }
}

/// Answer to a scan. `prompt` selects the form heading when `valid`.
#[derive(Debug, Serialize)]
pub struct ValidityResponse {
    pub valid: bool,
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scans_remaining: Option<u32>,
}

// ── Issue ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IssueQrCodeRequest {
    pub context: String,
    pub expiry_hours: i64,
    pub max_scans: i64,
}

pub async fn issue_qr_code(
    state: &AppState,
    body: IssueQrCodeRequest,
) -> Result<QrCodeResponse, FeedbackServiceError> {
    let usecase = IssueQrCodeUseCase {
        repo: state.qr_code_repo(),
        clock: state.clock(),
    };
    let code = usecase
        .execute(IssueQrCodeInput {
            context: body.context,
            expiry_hours: body.expiry_hours,
            max_scans: body.max_scans,
        })
        .await?;
    Ok(QrCodeResponse::from_code(code, state))
}

// ── Lookup ───────────────────────────────────────────────────────────────────

pub async fn get_qr_code(
    state: &AppState,
    qr_id: &str,
) -> Result<QrCodeResponse, FeedbackServiceError> {
    // An id that does not parse cannot have been issued.
    let id: QrCodeId = qr_id
        .parse()
        .map_err(|_| FeedbackServiceError::QrCodeNotFound)?;
    let usecase = GetQrCodeUseCase {
        repo: state.qr_code_repo(),
    };
    let code = usecase.execute(id).await?;
    Ok(QrCodeResponse::from_code(code, state))
}

pub async fn list_qr_codes(state: &AppState) -> Result<Vec<QrCodeResponse>, FeedbackServiceError> {
    let usecase = ListQrCodesUseCase {
        repo: state.qr_code_repo(),
    };
    let codes = usecase.execute().await?;
    Ok(codes
        .into_iter()
        .map(|code| QrCodeResponse::from_code(code, state))
        .collect())
}

// ── Validity (consumes a scan) ───────────────────────────────────────────────

pub async fn check_qr_code(
    state: &AppState,
    qr_id: &str,
) -> Result<ValidityResponse, FeedbackServiceError> {
    let outcome = match qr_id.parse::<QrCodeId>() {
        Ok(id) => {
            let usecase = CheckQrCodeUseCase {
                repo: state.qr_code_repo(),
                clock: state.clock(),
            };
            usecase.execute(id).await?
        }
        Err(_) => ScanOutcome::NotFound,
    };

    let reason = outcome.reason();
    Ok(match outcome {
        ScanOutcome::Accepted(code) => ValidityResponse {
            valid: true,
            reason,
            prompt: Some(context_prompt(&code.context)),
            scans_remaining: Some(code.scans_remaining()),
            context: Some(code.context),
        },
        _ => ValidityResponse {
            valid: false,
            reason,
            context: None,
            prompt: None,
            scans_remaining: None,
        },
    })
}
