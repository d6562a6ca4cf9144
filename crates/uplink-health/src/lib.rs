//! uplink-health: the concurrent endpoint check engine.
//!
//! Checks a list of HTTP(S) endpoints with bounded concurrency, retries
//! failed attempts, measures latency, and aggregates a pass/fail summary.
//!
//! # Architecture
//!
//! ```text
//! Checker::run(endpoints)
//!   ├── ConcurrencyLimiter (at most `concurrency` checks in flight)
//!   │   └── check_endpoint() → retry loop, at most max_retries + 1 attempts
//!   │       └── Probe::probe() → Outcome (success / status / error)
//!   └── aggregate() → RunResult (successes first, healthy/total)
//! ```
//!
//! `watch()` re-invokes `Checker::run` on a fixed period until shut down,
//! and `export::write_json` persists a `RunResult` once it has settled.

pub mod aggregate;
pub mod export;
pub mod limiter;
pub mod probe;
pub mod retry;
pub mod run;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::aggregate;
pub use export::ExportError;
pub use limiter::ConcurrencyLimiter;
pub use probe::{HttpProbe, Probe, ProbeFuture};
pub use retry::check_endpoint;
pub use run::Checker;
pub use watch::watch;
