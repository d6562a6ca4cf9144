//! Run orchestrator for one full pass over an endpoint list.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use uplink_core::{CheckConfig, ConfigError, RunResult};

use crate::aggregate::aggregate;
use crate::limiter::ConcurrencyLimiter;
use crate::probe::{HttpProbe, Probe};
use crate::retry::check_endpoint;

/// Drives limiter → retry → probe for every endpoint and aggregates
/// the outcomes.
pub struct Checker<P> {
    config: CheckConfig,
    probe: Arc<P>,
    limiter: ConcurrencyLimiter,
}

impl<P: Probe + 'static> Checker<P> {
    /// Create a checker. The config is validated up front.
    pub fn new(config: CheckConfig, probe: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let limiter = ConcurrencyLimiter::new(config.concurrency);
        Ok(Self {
            config,
            probe: Arc::new(probe),
            limiter,
        })
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check every endpoint once (plus retries) and summarize.
    ///
    /// Never fails: per-endpoint errors are carried in the outcomes and
    /// the result always holds exactly one outcome per endpoint.
    pub async fn run(&self, endpoints: &[String]) -> RunResult {
        let started = Instant::now();
        info!(
            endpoints = endpoints.len(),
            concurrency = self.config.concurrency,
            timeout_ms = self.config.timeout.as_millis() as u64,
            max_retries = self.config.max_retries,
            "check run started"
        );

        let timeout = self.config.timeout;
        let max_retries = self.config.max_retries;
        let ops = endpoints.iter().map(|url| {
            let probe = Arc::clone(&self.probe);
            let url = url.clone();
            async move { check_endpoint(probe.as_ref(), &url, timeout, max_retries).await }
        });

        let settled = self.limiter.run_all(ops).await;
        debug!(settled = settled.len(), "all checks settled");

        let result = aggregate(endpoints.iter().cloned().zip(settled));

        info!(
            healthy = result.healthy_count(),
            total = result.total_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "check run completed"
        );
        result
    }
}

impl Checker<HttpProbe> {
    /// Checker using the default HTTP(S) probe.
    pub fn http(config: CheckConfig) -> anyhow::Result<Self> {
        let probe = HttpProbe::new()?;
        Ok(Self::new(config, probe)?)
    }
}
