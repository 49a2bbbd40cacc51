use std::process::ExitCode;

use anyhow::Context;
use tracing::warn;

use qrfeed_core::clock::Clock;

use qrfeed_feedback::config::FeedbackConfig;
use qrfeed_feedback::infra::seed::seed_sample_feedback;
use qrfeed_feedback::session::run_demo_session;
use qrfeed_feedback::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    qrfeed_core::tracing::init_tracing(qrfeed_core::tracing::DEFAULT_DIRECTIVE);

    let config = FeedbackConfig::from_env();
    let state = AppState::new(config);

    if state.config.seed_sample_data {
        seed_sample_feedback(
            &state.feedback,
            state.clock.now(),
            state.config.sample_data_size,
        )
        .await
        .context("failed to seed sample feedback")?;
    }

    match run_demo_session(&state).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            // Internal errors are logged by `to_body`.
            let body = e.to_body();
            if e.is_validation() || e.is_not_found() {
                warn!(kind = e.kind(), "demo session rejected");
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
