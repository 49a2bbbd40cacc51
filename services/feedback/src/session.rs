//! Scripted visitor walk-through run by the `feedback` binary.

use serde::Serialize;
use tracing::info;

use crate::error::FeedbackServiceError;
use crate::handlers::dashboard::{DashboardQuery, DashboardResponse, get_dashboard};
use crate::handlers::feedback::{FeedbackResponse, SubmitFeedbackRequest, submit_feedback};
use crate::handlers::qr_code::{
    IssueQrCodeRequest, QrCodeResponse, ValidityResponse, check_qr_code, issue_qr_code,
};
use crate::state::AppState;

pub const DEMO_CONTEXT: &str = "Table 1";
pub const DEMO_COMMENT: &str = "Loved the atmosphere and the food was great";

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub qr_code: QrCodeResponse,
    pub scan: ValidityResponse,
    /// Absent when the scan was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackResponse>,
    pub dashboard: DashboardResponse,
}

/// Issue a code, scan it once, leave a 5-star comment and read the dashboard.
pub async fn run_demo_session(state: &AppState) -> Result<SessionReport, FeedbackServiceError> {
    let qr_code = issue_qr_code(
        state,
        IssueQrCodeRequest {
            context: DEMO_CONTEXT.to_owned(),
            expiry_hours: 24,
            max_scans: 2,
        },
    )
    .await?;
    info!(qr_id = %qr_code.id, url = %qr_code.feedback_url, "issued qr code");

    let qr_id = qr_code.id.to_string();
    let scan = check_qr_code(state, &qr_id).await?;
    info!(valid = scan.valid, reason = scan.reason, "scanned qr code");

    let feedback = if scan.valid {
        let feedback = submit_feedback(
            state,
            SubmitFeedbackRequest {
                qr_id,
                rating: 5,
                comment: DEMO_COMMENT.to_owned(),
            },
        )
        .await?;
        info!(feedback_id = %feedback.id, sentiment = %feedback.sentiment, "feedback stored");
        Some(feedback)
    } else {
        None
    };

    let dashboard = get_dashboard(state, DashboardQuery::default()).await?;
    Ok(SessionReport {
        qr_code,
        scan,
        feedback,
        dashboard,
    })
}
