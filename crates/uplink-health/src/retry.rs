//! Retry policy around a [`Probe`].

use std::time::Duration;

use tracing::debug;

use uplink_core::Outcome;

use crate::probe::Probe;

/// Check one endpoint, retrying failed attempts immediately.
///
/// Performs at most `max_retries + 1` attempts and returns the first
/// successful outcome, or the last failed one once the budget is spent.
/// Every failure class is retried the same way. The returned duration
/// belongs to the final attempt only.
pub async fn check_endpoint<P>(
    probe: &P,
    url: &str,
    timeout: Duration,
    max_retries: u32,
) -> Outcome
where
    P: Probe + ?Sized,
{
    let mut attempt: u32 = 0;
    loop {
        let outcome = probe.probe(url, timeout).await;
        if outcome.success || attempt >= max_retries {
            return outcome;
        }

        attempt += 1;
        debug!(
            %url,
            attempt,
            max_retries,
            reason = outcome.detail().as_deref().unwrap_or("failed"),
            "retrying endpoint"
        );
    }
}
