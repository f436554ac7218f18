use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Timing for one batch of script hook calls.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub event: &'static str,
    pub hooks: usize,
    pub errors: usize,
    pub duration_us: u128,
}

impl RunMetrics {
    /// A macro run should finish well inside one UI frame.
    pub const BUDGET_US: u128 = 16_000;

    pub fn over_budget(&self) -> bool {
        self.duration_us > Self::BUDGET_US
    }

    pub fn log(&self) {
        if self.over_budget() {
            tracing::warn!(
                event = self.event,
                hooks = self.hooks,
                errors = self.errors,
                duration_us = self.duration_us,
                "script run exceeded budget ({}us > {}us)",
                self.duration_us,
                Self::BUDGET_US
            );
        } else if self.errors > 0 {
            tracing::warn!(
                event = self.event,
                hooks = self.hooks,
                errors = self.errors,
                duration_us = self.duration_us,
                "script run completed with errors"
            );
        } else {
            tracing::debug!(
                event = self.event,
                hooks = self.hooks,
                duration_us = self.duration_us,
                "script run completed"
            );
        }
    }
}
