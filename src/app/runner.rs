use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::info;

use crate::domain::{AttemptOutcome, EndpointConfig, RequestTemplate, validate_headers};
use crate::error::AppResult;
use crate::http::{AttemptContext, Dispatcher, ReqwestTransport, Transport, build_request};
use crate::metrics::StatisticsSnapshot;

/// Everything a reporter needs about a finished run.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub started_at: DateTime<Utc>,
    pub wall_time: Duration,
    pub outcomes: Vec<AttemptOutcome>,
    pub stats: StatisticsSnapshot,
}

/// Probes the endpoint over HTTP with a `reqwest` transport.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built or when no outcome
/// was produced to aggregate.
pub async fn run_probe(config: EndpointConfig, template: RequestTemplate) -> AppResult<ProbeReport> {
    let transport = Arc::new(ReqwestTransport::new(&config)?);
    run_with_transport(transport, config, template).await
}

/// Probes the endpoint through any transport.
///
/// The template's headers are checked once, rendered for the first lane,
/// before any lane starts; a header HTTP would refuse is a configuration
/// error rather than a retryable send failure.
///
/// # Errors
///
/// Returns an error for an invalid template header, or when no outcome was
/// produced to aggregate.
pub async fn run_with_transport<T>(
    transport: Arc<T>,
    config: EndpointConfig,
    template: RequestTemplate,
) -> AppResult<ProbeReport>
where
    T: Transport + ?Sized + 'static,
{
    let first = build_request(&config, &template, AttemptContext::first(1));
    validate_headers(&first.headers)?;

    let started_at = Utc::now();
    let started = Instant::now();

    let dispatcher = Dispatcher::new(transport, Arc::new(config));
    let outcomes = dispatcher.run(&Arc::new(template)).await;
    let stats = StatisticsSnapshot::from_outcomes(&outcomes)?;
    let wall_time = started.elapsed();

    info!(
        "Run finished in {}ms: {} succeeded, {} failed.",
        wall_time.as_millis(),
        stats.successful,
        stats.failed
    );

    Ok(ProbeReport {
        started_at,
        wall_time,
        outcomes,
        stats,
    })
}
