//! Single-attempt endpoint probe.
//!
//! A probe issues one GET with a deadline and classifies the result into
//! an [`Outcome`]. It never fails: every error path is recorded in the
//! outcome itself.

use std::error::Error as _;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tracing::debug;

use uplink_core::{INVALID_PROTOCOL, Outcome, TIMEOUT};

/// Boxed future returned by [`Probe::probe`].
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = Outcome> + Send + 'a>>;

/// One check attempt against one endpoint. Injected for testability.
pub trait Probe: Send + Sync {
    /// Perform a single attempt. Must resolve within roughly `timeout`.
    fn probe<'a>(&'a self, url: &'a str, timeout: Duration) -> ProbeFuture<'a>;
}

/// HTTP(S) probe backed by a shared `reqwest` client.
///
/// Redirects are not followed, so a 3xx response counts as a failure.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("uplink/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    fn probe<'a>(&'a self, url: &'a str, timeout: Duration) -> ProbeFuture<'a> {
        Box::pin(http_probe(&self.client, url, timeout))
    }
}

/// Perform an HTTP GET against `url`.
///
/// Returns success for a 2xx response, a failure carrying the status for
/// any other response, and a failure carrying an error message when the
/// scheme is unsupported, the request fails, or no response headers
/// arrive within `timeout`.
pub async fn http_probe(client: &reqwest::Client, url: &str, timeout: Duration) -> Outcome {
    let started = Instant::now();

    if !has_http_scheme(url) {
        debug!(%url, "unsupported URL scheme");
        return Outcome::from_error(url, INVALID_PROTOCOL, elapsed_ms(started));
    }

    // Dropping the send future on timeout aborts the in-flight request.
    let result = tokio::time::timeout(timeout, client.get(url).send()).await;
    let duration_ms = elapsed_ms(started);

    match result {
        Ok(Ok(resp)) => {
            let status = resp.status().as_u16();
            // The body is never inspected; dropping it releases the connection.
            drop(resp);
            debug!(%url, status, duration_ms, "probe response");
            Outcome::from_status(url, status, duration_ms)
        }
        Ok(Err(e)) => {
            let message = error_chain(&e);
            debug!(%url, error = %message, duration_ms, "probe request failed");
            Outcome::from_error(url, message, duration_ms)
        }
        Err(_) => {
            debug!(%url, duration_ms, "probe timed out");
            Outcome::from_error(url, TIMEOUT, duration_ms)
        }
    }
}

/// Whether `url` starts with `http://` or `https://` (case-insensitive).
pub fn has_http_scheme(url: &str) -> bool {
    let starts_with = |prefix: &str| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

/// Render an error with its full source chain, e.g.
/// `error sending request: client error (Connect): tcp connect error: ...`.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
