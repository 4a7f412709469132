use std::collections::BTreeMap;
use std::time::Duration;

use super::*;
use crate::domain::{AttemptOutcome, Exchange, HttpMethod, RequestDescriptor};
use crate::error::{AppError, AppResult, MetricsError};

fn request() -> RequestDescriptor {
    RequestDescriptor {
        method: HttpMethod::Get,
        url: "http://localhost/health".to_owned(),
        headers: BTreeMap::new(),
        body: None,
        timeout: Duration::from_secs(1),
    }
}

fn completed(lane: usize, status: u16, elapsed_ms: u64, success: bool) -> AttemptOutcome {
    AttemptOutcome {
        lane,
        exchange: Exchange::Completed {
            status,
            body: String::new(),
            headers: BTreeMap::new(),
        },
        elapsed: Duration::from_millis(elapsed_ms),
        retry_count: 0,
        request: request(),
        success,
    }
}

fn failed(lane: usize, elapsed_ms: u64, retry_count: u32) -> AttemptOutcome {
    AttemptOutcome {
        lane,
        exchange: Exchange::Failed {
            error: "timed out".to_owned(),
        },
        elapsed: Duration::from_millis(elapsed_ms),
        retry_count,
        request: request(),
        success: false,
    }
}

#[expect(clippy::float_arithmetic, reason = "Tolerance comparison for f64 stats")]
fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

#[test]
fn snapshot_over_ten_evenly_spaced_latencies() -> AppResult<()> {
    // Shuffled on purpose: aggregation must sort.
    let latencies = [70, 10, 100, 40, 20, 90, 30, 60, 50, 80];
    let outcomes: Vec<AttemptOutcome> = latencies
        .iter()
        .zip(1_usize..)
        .map(|(elapsed, lane)| completed(lane, 200, *elapsed, true))
        .collect();

    let snapshot = StatisticsSnapshot::from_outcomes(&outcomes)?;

    if snapshot.total != 10 || snapshot.successful != 10 || snapshot.failed != 0 {
        return Err(AppError::metrics(format!("Unexpected counts: {:?}", snapshot)));
    }
    if !approx_eq(snapshot.mean_ms, 55.0) {
        return Err(AppError::metrics(format!("Unexpected mean: {}", snapshot.mean_ms)));
    }
    if snapshot.min != Duration::from_millis(10) || snapshot.max != Duration::from_millis(100) {
        return Err(AppError::metrics("Unexpected min/max"));
    }
    if snapshot.p90 != Duration::from_millis(100) {
        return Err(AppError::metrics(format!("Unexpected p90: {:?}", snapshot.p90)));
    }
    if !approx_eq(snapshot.stddev_ms, 825.0_f64.sqrt()) {
        return Err(AppError::metrics(format!(
            "Unexpected stddev: {}",
            snapshot.stddev_ms
        )));
    }
    if snapshot.success_rate_x100() != 10_000 || snapshot.failure_rate_x100() != 0 {
        return Err(AppError::metrics("Unexpected rates"));
    }
    Ok(())
}

#[test]
fn empty_outcomes_are_rejected() -> AppResult<()> {
    match StatisticsSnapshot::from_outcomes(&[]) {
        Err(AppError::Metrics(MetricsError::EmptyOutcomes)) => Ok(()),
        Err(err) => Err(AppError::metrics(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::metrics("Expected empty outcomes error")),
    }
}

#[test]
fn single_outcome_has_zero_spread() -> AppResult<()> {
    let snapshot = StatisticsSnapshot::from_outcomes(&[completed(1, 200, 42, true)])?;
    let expected = Duration::from_millis(42);
    if [snapshot.min, snapshot.max, snapshot.p90, snapshot.p95, snapshot.p99]
        .iter()
        .any(|value| *value != expected)
    {
        return Err(AppError::metrics(format!("Unexpected snapshot: {:?}", snapshot)));
    }
    if !approx_eq(snapshot.stddev_ms, 0.0) || !approx_eq(snapshot.mean_ms, 42.0) {
        return Err(AppError::metrics("Unexpected mean/stddev"));
    }
    Ok(())
}

#[test]
fn percentiles_are_ordered_and_bounded() -> AppResult<()> {
    for count in 1_u64..=40 {
        let outcomes: Vec<AttemptOutcome> = (1..=count)
            .zip(1_usize..)
            .map(|(elapsed, lane)| completed(lane, 200, elapsed.saturating_mul(3), true))
            .collect();
        let snapshot = StatisticsSnapshot::from_outcomes(&outcomes)?;
        let ordered = snapshot.min <= snapshot.p90
            && snapshot.p90 <= snapshot.p95
            && snapshot.p95 <= snapshot.p99
            && snapshot.p99 <= snapshot.max;
        if !ordered {
            return Err(AppError::metrics(format!(
                "Percentiles out of order for {} outcomes: {:?}",
                count, snapshot
            )));
        }
    }
    Ok(())
}

#[test]
fn nearest_rank_clamps_to_last_element() -> AppResult<()> {
    let sorted: Vec<Duration> = (1..=5).map(Duration::from_millis).collect();
    let cases = [
        (900, Some(Duration::from_millis(5))),
        (500, Some(Duration::from_millis(3))),
        (0, Some(Duration::from_millis(1))),
        (1000, Some(Duration::from_millis(5))),
    ];
    for (per_mille, expected) in cases {
        if nearest_rank(&sorted, per_mille) != expected {
            return Err(AppError::metrics(format!(
                "Unexpected rank for {} per mille",
                per_mille
            )));
        }
    }
    if nearest_rank(&[], 900).is_some() {
        return Err(AppError::metrics("Empty slice has no percentile"));
    }
    Ok(())
}

#[test]
fn distributions_count_statuses_and_retries() -> AppResult<()> {
    let outcomes = vec![
        completed(1, 200, 10, true),
        completed(2, 200, 12, true),
        completed(3, 500, 15, false),
        failed(4, 30, 3),
        failed(5, 31, 3),
    ];

    let snapshot = StatisticsSnapshot::from_outcomes(&outcomes)?;

    let expected_status: BTreeMap<Option<u16>, usize> =
        [(None, 2), (Some(200), 2), (Some(500), 1)].into_iter().collect();
    if snapshot.status_distribution != expected_status {
        return Err(AppError::metrics(format!(
            "Unexpected status distribution: {:?}",
            snapshot.status_distribution
        )));
    }
    let expected_retries: BTreeMap<u32, usize> = [(0, 3), (3, 2)].into_iter().collect();
    if snapshot.retry_distribution != expected_retries {
        return Err(AppError::metrics(format!(
            "Unexpected retry distribution: {:?}",
            snapshot.retry_distribution
        )));
    }
    if snapshot.successful != 2 || snapshot.failed != 3 {
        return Err(AppError::metrics("Unexpected success split"));
    }
    if snapshot.success_rate_x100() != 4_000 || snapshot.failure_rate_x100() != 6_000 {
        return Err(AppError::metrics("Unexpected rates"));
    }
    Ok(())
}

#[test]
fn rate_handles_zero_total() -> AppResult<()> {
    if rate_x100(0, 0) != 0 || rate_x100(1, 3) != 3_333 {
        return Err(AppError::metrics("Unexpected rate"));
    }
    Ok(())
}

#[test]
fn duration_ms_keeps_fractions() -> AppResult<()> {
    if !approx_eq(duration_ms(Duration::from_micros(1_500)), 1.5) {
        return Err(AppError::metrics("Expected 1.5ms"));
    }
    Ok(())
}
