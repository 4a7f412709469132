use std::ops::Range;

/// Decides whether a completed exchange counts as a success.
///
/// Only ever sees responses that actually arrived; transport failures are
/// unsuccessful without consulting the classifier.
pub trait SuccessClassifier: Send + Sync {
    fn classify(&self, status: u16, body: &str) -> bool;
}

impl<F> SuccessClassifier for F
where
    F: Fn(u16, &str) -> bool + Send + Sync,
{
    fn classify(&self, status: u16, body: &str) -> bool {
        self(status, body)
    }
}

/// Success iff the status lies in a half-open range. Defaults to `200..300`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRange(pub Range<u16>);

impl Default for StatusRange {
    fn default() -> Self {
        Self(200..300)
    }
}

impl SuccessClassifier for StatusRange {
    fn classify(&self, status: u16, _body: &str) -> bool {
        self.0.contains(&status)
    }
}

/// Declarative classifier built from CLI/config expectations.
///
/// When `statuses` is empty the default 2xx range applies; otherwise the
/// status must be one of the listed codes. `body_contains` additionally
/// requires the fragment to appear in the response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectation {
    pub statuses: Vec<u16>,
    pub body_contains: Option<String>,
}

impl SuccessClassifier for Expectation {
    fn classify(&self, status: u16, body: &str) -> bool {
        let status_ok = if self.statuses.is_empty() {
            StatusRange::default().classify(status, body)
        } else {
            self.statuses.contains(&status)
        };
        status_ok
            && self
                .body_contains
                .as_deref()
                .is_none_or(|fragment| body.contains(fragment))
    }
}
