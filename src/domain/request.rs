use std::collections::BTreeMap;
use std::time::Duration;

use super::HttpMethod;

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// `None` for methods that do not send a body.
    pub body: Option<String>,
    pub timeout: Duration,
}
