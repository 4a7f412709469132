use std::io::Write;
use std::time::Duration;

use crate::app::ProbeReport;
use crate::domain::{AttemptOutcome, Exchange};
use crate::error::AppResult;
use crate::metrics::{duration_ms, rate_x100};

use super::format_x100;

/// Writes the human-readable summary, optionally followed by every outcome.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub fn render_text<W: Write>(out: &mut W, report: &ProbeReport, details: bool) -> AppResult<()> {
    let stats = &report.stats;

    writeln!(out, "Test Results Summary:")?;
    writeln!(out, "====================")?;
    writeln!(out, "Total Requests: {}", stats.total)?;
    writeln!(
        out,
        "Successful Requests: {} ({}%)",
        stats.successful,
        format_x100(stats.success_rate_x100())
    )?;
    writeln!(
        out,
        "Failed Requests: {} ({}%)",
        stats.failed,
        format_x100(stats.failure_rate_x100())
    )?;
    writeln!(out, "Wall Time: {}ms", report.wall_time.as_millis())?;

    writeln!(out)?;
    writeln!(out, "Response Time Statistics:")?;
    writeln!(out, "========================")?;
    writeln!(out, "Average Response Time: {:.2}ms", stats.mean_ms)?;
    writeln!(out, "Minimum Response Time: {}", format_ms(stats.min))?;
    writeln!(out, "Maximum Response Time: {}", format_ms(stats.max))?;
    writeln!(out, "Standard Deviation: {:.2}ms", stats.stddev_ms)?;
    writeln!(out, "90th Percentile: {}", format_ms(stats.p90))?;
    writeln!(out, "95th Percentile: {}", format_ms(stats.p95))?;
    writeln!(out, "99th Percentile: {}", format_ms(stats.p99))?;

    writeln!(out)?;
    writeln!(out, "Status Code Distribution:")?;
    writeln!(out, "========================")?;
    for (status, count) in &stats.status_distribution {
        let label = status.map_or_else(
            || "Transport error".to_owned(),
            |code| format!("Status {}", code),
        );
        writeln!(
            out,
            "{}: {} requests ({}%)",
            label,
            count,
            format_x100(rate_x100(*count, stats.total))
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Retry Distribution:")?;
    writeln!(out, "==================")?;
    for (retries, count) in &stats.retry_distribution {
        writeln!(
            out,
            "{} retries: {} requests ({}%)",
            retries,
            count,
            format_x100(rate_x100(*count, stats.total))
        )?;
    }

    if details {
        writeln!(out)?;
        writeln!(out, "Detailed Results:")?;
        writeln!(out, "=================")?;
        for outcome in &report.outcomes {
            render_outcome(out, outcome)?;
        }
    }

    Ok(())
}

fn render_outcome<W: Write>(out: &mut W, outcome: &AttemptOutcome) -> AppResult<()> {
    writeln!(out)?;
    writeln!(out, "Request #{}:", outcome.lane)?;
    writeln!(out, "URL: {}", outcome.request.url)?;
    writeln!(out, "Method: {}", outcome.request.method)?;
    match outcome.status() {
        Some(status) => writeln!(out, "Status Code: {}", status)?,
        None => writeln!(out, "Status Code: none (transport failure)")?,
    }
    writeln!(out, "Response Time: {}", format_ms(outcome.elapsed))?;
    writeln!(out, "Retry Count: {}", outcome.retry_count)?;
    writeln!(out, "Success: {}", outcome.success)?;

    writeln!(out, "Request Headers:")?;
    for (key, value) in &outcome.request.headers {
        writeln!(out, "  {}: {}", key, value)?;
    }
    if let Some(body) = outcome.request.body.as_deref()
        && !body.is_empty()
    {
        writeln!(out, "Request Body: {}", body)?;
    }

    writeln!(out, "Response Headers:")?;
    if let Exchange::Completed { headers, .. } = &outcome.exchange {
        for (key, values) in headers {
            writeln!(out, "  {}: {}", key, values.join(", "))?;
        }
    }
    writeln!(out, "Response Body: {}", outcome.body())?;
    Ok(())
}

fn format_ms(duration: Duration) -> String {
    format!("{:.2}ms", duration_ms(duration))
}
