use std::io::Write;

use serde_json::{Value, json};

use crate::app::ProbeReport;
use crate::domain::{AttemptOutcome, Exchange};
use crate::error::AppResult;
use crate::metrics::duration_ms;

/// Builds the JSON document for a finished run.
#[must_use]
pub fn report_json(report: &ProbeReport) -> Value {
    let stats = &report.stats;

    let status_distribution: Vec<Value> = stats
        .status_distribution
        .iter()
        .map(|(status, count)| json!({ "status": status, "count": count }))
        .collect();
    let retry_distribution: Vec<Value> = stats
        .retry_distribution
        .iter()
        .map(|(retries, count)| json!({ "retries": retries, "count": count }))
        .collect();
    let results: Vec<Value> = report.outcomes.iter().map(outcome_json).collect();

    json!({
        "started_at": report.started_at.to_rfc3339(),
        "wall_time_ms": report.wall_time.as_millis(),
        "summary": {
            "total_requests": stats.total,
            "successful_requests": stats.successful,
            "failed_requests": stats.failed,
            "avg_response_time_ms": stats.mean_ms,
            "min_response_time_ms": duration_ms(stats.min),
            "max_response_time_ms": duration_ms(stats.max),
            "stddev_response_time_ms": stats.stddev_ms,
            "p90_response_time_ms": duration_ms(stats.p90),
            "p95_response_time_ms": duration_ms(stats.p95),
            "p99_response_time_ms": duration_ms(stats.p99),
            "status_distribution": status_distribution,
            "retry_distribution": retry_distribution
        },
        "results": results
    })
}

/// Writes [`report_json`] as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error when serialization or writing to `out` fails.
pub fn render_json<W: Write>(out: &mut W, report: &ProbeReport) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *out, &report_json(report))?;
    writeln!(out)?;
    Ok(())
}

fn outcome_json(outcome: &AttemptOutcome) -> Value {
    let (response_headers, response_body, error) = match &outcome.exchange {
        Exchange::Completed { headers, body, .. } => (json!(headers), json!(body), Value::Null),
        Exchange::Failed { error } => (json!({}), Value::Null, json!(error)),
    };
    json!({
        "lane": outcome.lane,
        "method": outcome.request.method.as_str(),
        "url": outcome.request.url,
        "request_headers": outcome.request.headers,
        "request_body": outcome.request.body,
        "status": outcome.status(),
        "success": outcome.success,
        "retry_count": outcome.retry_count,
        "response_time_ms": duration_ms(outcome.elapsed),
        "response_headers": response_headers,
        "response_body": response_body,
        "error": error
    })
}
