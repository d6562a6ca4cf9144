//! Check configuration and the optional `uplink.toml` file.
//!
//! [`CheckConfig`] is the runtime value threaded into the engine.
//! [`UplinkConfig`] is the on-disk form; every field is optional and
//! falls back to the built-in default.
//!
//! ```toml
//! [check]
//! concurrency = 20
//! timeout = "2s"
//! retries = 1
//! watch_interval = "1m"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of endpoints checked simultaneously.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Largest accepted concurrency; matches the permit ceiling of the
/// semaphore that gates in-flight checks.
pub const MAX_CONCURRENCY: usize = usize::MAX >> 3;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default period between watch-mode runs.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(60_000);

/// Runtime configuration for one checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Maximum number of endpoint checks in flight.
    pub concurrency: usize,
    /// Deadline for a single attempt to receive response headers.
    pub timeout: Duration,
    /// Extra attempts after a failure. Zero means a single attempt.
    pub max_retries: u32,
    /// When set, the whole run repeats on this period.
    pub watch_interval: Option<Duration>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
            watch_interval: None,
        }
    }
}

impl CheckConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be positive".into()));
        }
        if self.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::Invalid(format!(
                "concurrency must be at most {MAX_CONCURRENCY}"
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be positive".into()));
        }
        if self.watch_interval.is_some_and(|i| i.is_zero()) {
            return Err(ConfigError::Invalid("watch interval must be positive".into()));
        }
        Ok(())
    }
}

// ── File config ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UplinkConfig {
    pub check: Option<CheckSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSection {
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub retries: Option<u32>,
    pub watch_interval: Option<String>,
}

impl UplinkConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve into a runtime config, defaults filling the gaps.
    ///
    /// `watch_interval` in the file only sets the period; watch mode
    /// itself is switched on by the caller.
    pub fn to_check_config(&self) -> Result<CheckConfig, ConfigError> {
        let mut config = CheckConfig::default();
        let Some(check) = &self.check else {
            return Ok(config);
        };

        if let Some(concurrency) = check.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout) = &check.timeout {
            config.timeout = parse_duration(timeout).ok_or_else(|| ConfigError::Duration {
                field: "timeout",
                value: timeout.clone(),
            })?;
        }
        if let Some(retries) = check.retries {
            config.max_retries = retries;
        }
        if let Some(interval) = &check.watch_interval {
            let interval = parse_duration(interval).ok_or_else(|| ConfigError::Duration {
                field: "watch_interval",
                value: interval.clone(),
            })?;
            config.watch_interval = Some(interval);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse a duration such as `"500ms"`, `"5s"` or `"1m"`. A bare number
/// counts as seconds. Values that overflow are rejected.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (amount, millis_per_unit) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000)
    } else {
        (s, 1_000)
    };

    let amount: u64 = amount.trim_end().parse().ok()?;
    amount.checked_mul(millis_per_unit).map(Duration::from_millis)
}
