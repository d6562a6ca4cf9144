//! Shared fixtures for unit tests: the local hyper server from
//! `tests/common` and scripted probes.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use uplink_core::Outcome;

use crate::probe::{Probe, ProbeFuture};

// The hyper fixtures live with the integration tests; unit tests share them.
#[path = "../tests/common/mod.rs"]
mod server;

pub use server::{refused_addr, spawn_server};

/// Probe that replays a fixed sequence of outcomes, then repeats the last.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<Outcome>>,
    last: Mutex<Option<Outcome>>,
    calls: AtomicU32,
}

impl ScriptedProbe {
    pub fn new(script: Vec<Outcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Probe for ScriptedProbe {
    fn probe<'a>(&'a self, url: &'a str, _timeout: Duration) -> ProbeFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        let outcome = match next {
            Some(outcome) => {
                *self.last.lock().unwrap() = Some(outcome.clone());
                outcome
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Outcome::from_error(url, "empty script", 0)),
        };
        Box::pin(async move { outcome })
    }
}

/// Probe that answers from the URL alone: paths containing `ok` succeed
/// with 200, paths containing `panic` panic, everything else fails with 500.
pub struct UrlProbe;

impl Probe for UrlProbe {
    fn probe<'a>(&'a self, url: &'a str, _timeout: Duration) -> ProbeFuture<'a> {
        Box::pin(async move {
            if url.contains("panic") {
                panic!("probe exploded for {url}");
            }
            let status = if url.contains("ok") { 200 } else { 500 };
            Outcome::from_status(url, status, 1)
        })
    }
}
