use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::error::ValidationError;

use super::validate_headers;

/// Process-wide endpoint settings shared read-only by every lane of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
    concurrency: usize,
    timeout: Duration,
    max_retries: u32,
    default_headers: BTreeMap<String, String>,
}

impl EndpointConfig {
    /// Validates and freezes the endpoint settings.
    ///
    /// `base_url` must be an absolute http(s) URL with a host. The endpoint
    /// path of each request is appended to it verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error when `concurrency` is zero, `timeout` is zero, the
    /// base URL does not parse, or a default header is not valid HTTP.
    pub fn new(
        base_url: impl Into<String>,
        concurrency: usize,
        timeout: Duration,
        max_retries: u32,
        default_headers: BTreeMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        if concurrency == 0 {
            return Err(ValidationError::ConcurrencyZero);
        }
        if timeout.is_zero() {
            return Err(ValidationError::TimeoutZero);
        }
        validate_base_url(&base_url)?;
        validate_headers(&default_headers)?;

        Ok(Self {
            base_url,
            concurrency,
            timeout,
            max_retries,
            default_headers,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(base_url).map_err(|err| ValidationError::InvalidUrl {
        url: base_url.to_owned(),
        source: err,
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost {
            url: base_url.to_owned(),
        });
    }
    Ok(())
}
