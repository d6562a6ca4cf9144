//! Aggregation of settled checks into a [`RunResult`].

use std::fmt::Display;

use tracing::warn;

use uplink_core::{Outcome, RunResult};

/// Build a run result from `(url, settled)` pairs in enumeration order.
///
/// A check that failed internally becomes an `unknown` placeholder so
/// every endpoint is still counted. Outcomes are then ordered successes
/// first, keeping enumeration order within each group.
pub fn aggregate<I, E>(settled: I) -> RunResult
where
    I: IntoIterator<Item = (String, Result<Outcome, E>)>,
    E: Display,
{
    let mut outcomes: Vec<Outcome> = settled
        .into_iter()
        .map(|(url, result)| match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%url, error = %e, "check did not settle");
                Outcome::unsettled(url)
            }
        })
        .collect();

    sort_outcomes(&mut outcomes);
    RunResult::new(outcomes)
}

/// Stable partition: successes before failures.
pub fn sort_outcomes(outcomes: &mut [Outcome]) {
    outcomes.sort_by_key(|o| !o.success);
}
