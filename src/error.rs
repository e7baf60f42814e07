use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server error: HTTP {status}")]
    Server { status: u16 },

    #[error("unexpected status: HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("giving up on {url} after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether the retry loop should try again after this error.
    /// Every single-attempt failure counts, client errors included.
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::Exhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_wraps_last_attempt() {
        let err = FetchError::Exhausted {
            url: "https://example.test/prices".into(),
            attempts: 4,
            last: Box::new(FetchError::Server { status: 503 }),
        };

        assert!(!err.is_transient());
        assert_eq!(
            err.to_string(),
            "giving up on https://example.test/prices after 4 attempts: server error: HTTP 503"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("server error: HTTP 503"));
    }

    #[test]
    fn client_errors_are_retried_too() {
        assert!(FetchError::Status { status: 404 }.is_transient());
    }
}
