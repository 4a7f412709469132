use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{HttpMethod, StatusRange, SuccessClassifier};

/// The request every lane of a run sends.
///
/// `path`, header names/values and `body` may contain `{{lane}}` and
/// `{{attempt}}` placeholders; they are rendered per attempt.
#[derive(Clone)]
pub struct RequestTemplate {
    pub path: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub classifier: Arc<dyn SuccessClassifier>,
}

impl RequestTemplate {
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        method: HttpMethod,
        headers: BTreeMap<String, String>,
        body: impl Into<String>,
        classifier: Arc<dyn SuccessClassifier>,
    ) -> Self {
        Self {
            path: path.into(),
            method,
            headers,
            body: body.into(),
            classifier,
        }
    }

    /// A bodiless template with no header overrides and the 2xx classifier.
    #[must_use]
    pub fn simple(path: impl Into<String>, method: HttpMethod) -> Self {
        Self::new(
            path,
            method,
            BTreeMap::new(),
            String::new(),
            Arc::new(StatusRange::default()),
        )
    }
}

impl fmt::Debug for RequestTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestTemplate")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
