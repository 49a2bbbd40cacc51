use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directive when `RUST_LOG` is unset: service crates at info, the
/// rest of the dependency tree at warn.
pub const DEFAULT_DIRECTIVE: &str = "warn,qrfeed_feedback=info,qrfeed_core=info";

/// Install the JSON stdout subscriber.
///
/// `RUST_LOG` wins over `default_directive`. Returns `false` if a global
/// subscriber was already installed, which leaves the existing one in place.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .try_init()
        .is_ok()
}
