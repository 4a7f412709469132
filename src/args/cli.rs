use clap::Parser;

use super::parsers::{parse_bool_env, parse_header, parse_positive_u64, parse_positive_usize};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP endpoint prober - fires a burst of identical requests, retries transport failures, and reports latency statistics.",
    next_help_heading = "Advanced Options"
)]
pub struct ProbeArgs {
    /// Base URL of the API under test (e.g. http://localhost:8080)
    #[arg(long, short, help_heading = "Common Options")]
    pub url: Option<String>,

    /// Endpoint path appended verbatim to the base URL
    #[arg(long, short, default_value = "", help_heading = "Common Options")]
    pub path: String,

    /// HTTP method: GET, POST, PUT, DELETE or PATCH (case-insensitive; anything else falls back to GET)
    #[arg(long, short = 'X', default_value = "GET", help_heading = "Common Options")]
    pub method: String,

    /// Default headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header, help_heading = "Common Options")]
    pub headers: Vec<(String, String)>,

    /// Per-request header overrides in 'Key: Value' format, applied over the defaults (repeatable)
    #[arg(long = "request-header", value_parser = parse_header)]
    pub request_headers: Vec<(String, String)>,

    /// Request body (sent for POST, PUT and PATCH)
    #[arg(long, short, default_value = "", help_heading = "Common Options")]
    pub data: String,

    /// Number of concurrent requests to fire
    #[arg(long, short, default_value = "10", value_parser = parse_positive_usize, help_heading = "Common Options")]
    pub concurrency: PositiveUsize,

    /// Per-attempt timeout in seconds
    #[arg(long, short, default_value = "30", value_parser = parse_positive_u64)]
    pub timeout: PositiveU64,

    /// Maximum retries per request on transport failures (HTTP error statuses are never retried)
    #[arg(long, short, default_value_t = 3)]
    pub retries: u32,

    /// Status codes counted as success (repeatable; defaults to any 2xx)
    #[arg(long = "expect-status")]
    pub expect_status: Vec<u16>,

    /// Require the response body to contain this fragment for success
    #[arg(long = "expect-body-contains")]
    pub expect_body_contains: Option<String>,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Include every request/response in the text report
    #[arg(long)]
    pub details: bool,

    /// Path to config file (TOML/JSON). Defaults to ./apiburst.toml or ./apiburst.json if present.
    #[arg(long, help_heading = "Common Options")]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by APIBURST_LOG/RUST_LOG)
    #[arg(long, short = 'v', help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
