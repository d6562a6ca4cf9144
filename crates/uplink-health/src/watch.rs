//! Watch mode: repeat the whole run on a fixed period.
//!
//! The period is measured from the start of one run to the start of the
//! next. Runs never overlap: a run that outlasts the period is followed
//! immediately by the next one. The endpoint list is reloaded on every
//! tick.

use std::time::Duration;

use tokio::sync::watch::Receiver;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use uplink_core::{InputError, RunResult};

use crate::probe::Probe;
use crate::run::Checker;

/// Run `checker` every `interval` until `shutdown` fires.
///
/// `load` is called at each tick to fetch the endpoint list. A load
/// failure before the first run is returned; later failures are logged
/// and that tick is skipped. Each finished run is passed to `on_result`.
/// Returns the number of completed runs.
pub async fn watch<P, L, F>(
    checker: &Checker<P>,
    interval: Duration,
    mut load: L,
    mut on_result: F,
    mut shutdown: Receiver<bool>,
) -> Result<u64, InputError>
where
    P: Probe + 'static,
    L: FnMut() -> Result<Vec<String>, InputError>,
    F: FnMut(RunResult),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut runs: u64 = 0;

    info!(interval_ms = interval.as_millis() as u64, "watch mode started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }

        let endpoints = match load() {
            Ok(endpoints) => endpoints,
            Err(e) if runs == 0 => return Err(e),
            Err(e) => {
                warn!(error = %e, "failed to reload endpoints, skipping tick");
                continue;
            }
        };

        tokio::select! {
            result = checker.run(&endpoints) => {
                runs += 1;
                debug!(run = runs, "watch run finished");
                on_result(result);
            }
            _ = shutdown.changed() => break,
        }
    }

    info!(runs, "watch mode stopped");
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::sync::watch::channel;
    use tokio::time::Instant;

    use crate::test_support::UrlProbe;
    use uplink_core::CheckConfig;

    const PERIOD: Duration = Duration::from_millis(60_000);

    fn list() -> Vec<String> {
        vec![
            "http://ok/1".to_string(),
            "http://bad/2".to_string(),
            "http://ok/3".to_string(),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_runs_match_and_start_one_period_apart() {
        let checker = Checker::new(CheckConfig::default(), UrlProbe).unwrap();
        let (stop_tx, stop_rx) = channel(false);

        let mut seen: Vec<(Instant, RunResult)> = Vec::new();
        let runs = watch(
            &checker,
            PERIOD,
            || Ok(list()),
            |result| {
                seen.push((Instant::now(), result));
                if seen.len() == 2 {
                    let _ = stop_tx.send(true);
                }
            },
            stop_rx,
        )
        .await
        .unwrap();

        assert_eq!(runs, 2);
        let (t0, first) = &seen[0];
        let (t1, second) = &seen[1];
        assert_eq!(first.total_count(), 3);
        assert_eq!(first.total_count(), second.total_count());
        assert_eq!(first.healthy_count(), second.healthy_count());
        assert_eq!(*t1 - *t0, PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn first_load_failure_is_fatal() {
        let checker = Checker::new(CheckConfig::default(), UrlProbe).unwrap();
        let (_stop_tx, stop_rx) = channel(false);

        let err = watch(
            &checker,
            PERIOD,
            || Err(InputError::Empty(PathBuf::from("urls.txt"))),
            |_| panic!("no run expected"),
            stop_rx,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, InputError::Empty(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn later_load_failure_skips_tick() {
        let checker = Checker::new(CheckConfig::default(), UrlProbe).unwrap();
        let (stop_tx, stop_rx) = channel(false);

        let mut loads = 0;
        let mut totals = Vec::new();
        let runs = watch(
            &checker,
            PERIOD,
            || {
                loads += 1;
                if loads == 2 {
                    Err(InputError::Empty(PathBuf::from("urls.txt")))
                } else {
                    Ok(list())
                }
            },
            |result| {
                totals.push(result.total_count());
                if totals.len() == 2 {
                    let _ = stop_tx.send(true);
                }
            },
            stop_rx,
        )
        .await
        .unwrap();

        assert_eq!(runs, 2);
        assert_eq!(loads, 3);
        assert_eq!(totals, vec![3, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_tick_completes() {
        let checker = Checker::new(CheckConfig::default(), UrlProbe).unwrap();
        let (stop_tx, stop_rx) = channel(false);
        stop_tx.send(true).unwrap();

        // The first tick is immediate, so one run may still happen; the
        // loop must then stop instead of waiting for the next period.
        let runs = watch(&checker, PERIOD, || Ok(list()), |_| {}, stop_rx)
            .await
            .unwrap();
        assert!(runs <= 1);
    }
}
