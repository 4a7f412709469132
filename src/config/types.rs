use serde::Deserialize;

use crate::args::OutputFormat;

/// On-disk run configuration. Every field is optional; CLI flags win.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(alias = "base_url")]
    pub url: Option<String>,
    #[serde(alias = "concurrent_requests")]
    pub concurrency: Option<usize>,
    /// Per-attempt timeout in seconds.
    #[serde(alias = "timeout_seconds")]
    pub timeout: Option<u64>,
    #[serde(alias = "max_retries")]
    pub retries: Option<u32>,
    /// Default headers, `Key: Value`.
    pub headers: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub details: Option<bool>,
    pub request: Option<RequestConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestConfig {
    #[serde(alias = "endpoint")]
    pub path: Option<String>,
    pub method: Option<String>,
    /// Header overrides, `Key: Value`.
    pub headers: Option<Vec<String>>,
    #[serde(alias = "body")]
    pub data: Option<String>,
    pub expect_status: Option<Vec<u16>>,
    pub expect_body_contains: Option<String>,
}
