use std::thread;
use std::time::Duration;

use reqwest::redirect;
use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::FetchError;
use crate::models::Snapshot;

const USER_AGENT: &str = concat!("tcgcsv_price_snapshot/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed GET, whatever the status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .redirect(redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, FetchError> {
        let resp = self.client.get(url).timeout(timeout).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Fetches `{"results": [...]}` documents, retrying every failure with
/// exponential backoff until the policy's attempts run out.
pub struct Fetcher<T, S = fn(Duration)> {
    transport: T,
    policy: RetryPolicy,
    sleep: S,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy, sleep: thread::sleep }
    }
}

impl<T: Transport, S: Fn(Duration)> Fetcher<T, S> {
    pub fn with_sleep<S2: Fn(Duration)>(self, sleep: S2) -> Fetcher<T, S2> {
        Fetcher { transport: self.transport, policy: self.policy, sleep }
    }

    pub fn fetch(&self, url: &str) -> Result<Snapshot, FetchError> {
        let attempts = self.policy.attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.attempt(url) {
                Ok(snapshot) => {
                    debug!(url, attempt, records = snapshot.results.len(), "fetched");
                    return Ok(snapshot);
                }
                Err(err) if err.is_transient() && attempt + 1 < attempts => {
                    let delay = self.policy.delay(attempt);
                    warn!(url, attempt, error = %err, ?delay, "fetch failed, retrying");
                    (self.sleep)(delay);
                    attempt += 1;
                }
                Err(err) => {
                    warn!(url, attempt, error = %err, "fetch failed, giving up");
                    return Err(FetchError::Exhausted {
                        url: url.to_string(),
                        attempts: attempt + 1,
                        last: Box::new(err),
                    });
                }
            }
        }
    }

    fn attempt(&self, url: &str) -> Result<Snapshot, FetchError> {
        let resp = self.transport.get(url, self.policy.timeout)?;
        if resp.status >= 500 {
            return Err(FetchError::Server { status: resp.status });
        }
        if !(200..300).contains(&resp.status) {
            return Err(FetchError::Status { status: resp.status });
        }
        Ok(serde_json::from_str(&resp.body)?)
    }
}
