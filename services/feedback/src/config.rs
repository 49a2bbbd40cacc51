use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::domain::types::DEFAULT_TOP_N;

/// Feedback service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// Origin prepended to feedback links (default "http://localhost:8080").
    /// Env var: `FEEDBACK_PUBLIC_ORIGIN`.
    pub public_origin: String,
    /// Simulated classification latency (default 300 ms). Env var: `SENTIMENT_LATENCY_MS`.
    pub sentiment_latency: Duration,
    /// Classification deadline before degrading to neutral (default 2000 ms).
    /// Env var: `SENTIMENT_TIMEOUT_MS`.
    pub sentiment_timeout: Duration,
    /// Length of the dashboard's recent-feedback list (default 10). Env var: `DASHBOARD_TOP_N`.
    pub dashboard_top_n: usize,
    /// Seed demo feedback at startup (default true). Env var: `SEED_SAMPLE_DATA`.
    pub seed_sample_data: bool,
    /// Number of seeded records (default 15). Env var: `SAMPLE_DATA_SIZE`.
    pub sample_data_size: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            public_origin: "http://localhost:8080".to_owned(),
            sentiment_latency: Duration::from_millis(300),
            sentiment_timeout: Duration::from_millis(2000),
            dashboard_top_n: DEFAULT_TOP_N,
            seed_sample_data: true,
            sample_data_size: 15,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl FeedbackConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            public_origin: env_or("FEEDBACK_PUBLIC_ORIGIN", defaults.public_origin),
            sentiment_latency: Duration::from_millis(env_or(
                "SENTIMENT_LATENCY_MS",
                defaults.sentiment_latency.as_millis() as u64,
            )),
            sentiment_timeout: Duration::from_millis(env_or(
                "SENTIMENT_TIMEOUT_MS",
                defaults.sentiment_timeout.as_millis() as u64,
            )),
            dashboard_top_n: env_or("DASHBOARD_TOP_N", defaults.dashboard_top_n),
            seed_sample_data: env_or("SEED_SAMPLE_DATA", defaults.seed_sample_data),
            sample_data_size: env_or("SAMPLE_DATA_SIZE", defaults.sample_data_size),
        }
    }

    /// Link encoded into the QR image: `<origin>/feedback/<id>`.
    pub fn feedback_url(&self, qr_id: impl std::fmt::Display) -> String {
        format!("{}/feedback/{}", self.public_origin.trim_end_matches('/'), qr_id)
    }
}
