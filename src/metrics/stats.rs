use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::AttemptOutcome;
use crate::error::{AppError, AppResult, MetricsError};

/// Percentile cuts expressed in per-mille so index math stays integral.
const P90_PER_MILLE: usize = 900;
const P95_PER_MILLE: usize = 950;
const P99_PER_MILLE: usize = 990;
const PER_MILLE_DIVISOR: usize = 1000;
/// Scale for percentages carried as hundredths (12.34% -> 1234).
const PERCENT_X100: u128 = 10_000;
const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Summary of one run, derived once from the full outcome set.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub mean_ms: f64,
    pub min: Duration,
    pub max: Duration,
    /// Population standard deviation.
    pub stddev_ms: f64,
    pub p90: Duration,
    pub p95: Duration,
    pub p99: Duration,
    /// Outcomes per HTTP status; `None` counts transport failures.
    pub status_distribution: BTreeMap<Option<u16>, usize>,
    pub retry_distribution: BTreeMap<u32, usize>,
}

impl StatisticsSnapshot {
    /// Reduces the outcomes of a run.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::EmptyOutcomes` when `outcomes` is empty; min,
    /// mean and percentiles are undefined there.
    pub fn from_outcomes(outcomes: &[AttemptOutcome]) -> AppResult<Self> {
        if outcomes.is_empty() {
            return Err(AppError::metrics(MetricsError::EmptyOutcomes));
        }

        let total = outcomes.len();
        let successful = outcomes.iter().filter(|outcome| outcome.success).count();
        let failed = total.saturating_sub(successful);

        let mut elapsed: Vec<Duration> = outcomes.iter().map(|outcome| outcome.elapsed).collect();
        elapsed.sort_unstable();

        let (Some(min), Some(max)) = (elapsed.first().copied(), elapsed.last().copied()) else {
            return Err(AppError::metrics(MetricsError::EmptyOutcomes));
        };
        let (mean_ms, stddev_ms) = mean_and_stddev(&elapsed);

        let mut status_distribution = BTreeMap::new();
        let mut retry_distribution = BTreeMap::new();
        for outcome in outcomes {
            let by_status: &mut usize = status_distribution.entry(outcome.status()).or_default();
            *by_status = by_status.saturating_add(1);
            let by_retry: &mut usize = retry_distribution.entry(outcome.retry_count).or_default();
            *by_retry = by_retry.saturating_add(1);
        }

        Ok(Self {
            total,
            successful,
            failed,
            mean_ms,
            min,
            max,
            stddev_ms,
            p90: nearest_rank(&elapsed, P90_PER_MILLE).unwrap_or(max),
            p95: nearest_rank(&elapsed, P95_PER_MILLE).unwrap_or(max),
            p99: nearest_rank(&elapsed, P99_PER_MILLE).unwrap_or(max),
            status_distribution,
            retry_distribution,
        })
    }

    /// Share of successful outcomes in hundredths of a percent.
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        rate_x100(self.successful, self.total)
    }

    /// Share of failed outcomes in hundredths of a percent.
    #[must_use]
    pub fn failure_rate_x100(&self) -> u64 {
        rate_x100(self.failed, self.total)
    }
}

/// Nearest-rank percentile over an ascending slice.
///
/// Picks the element at `floor(len * per_mille / 1000)`, clamped to the last
/// element. Returns `None` for an empty slice.
#[must_use]
pub fn nearest_rank(sorted: &[Duration], per_mille: usize) -> Option<Duration> {
    let last = sorted.len().checked_sub(1)?;
    let index = sorted
        .len()
        .checked_mul(per_mille)
        .and_then(|scaled| scaled.checked_div(PER_MILLE_DIVISOR))
        .map_or(last, |index| index.min(last));
    sorted.get(index).copied()
}

/// Share of `part` in `total`, in hundredths of a percent.
#[must_use]
pub fn rate_x100(part: usize, total: usize) -> u64 {
    let Ok(part) = u128::try_from(part) else {
        return 0;
    };
    let Ok(total) = u128::try_from(total) else {
        return 0;
    };
    let scaled = part
        .saturating_mul(PERCENT_X100)
        .checked_div(total)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Millisecond latencies are reported with fractional precision"
)]
#[must_use]
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / NANOS_PER_MILLI
}

#[expect(
    clippy::float_arithmetic,
    reason = "Mean and variance are real-valued"
)]
fn mean_and_stddev(elapsed: &[Duration]) -> (f64, f64) {
    let count = elapsed.len() as f64;
    let mean = elapsed.iter().copied().map(duration_ms).sum::<f64>() / count;
    let variance = elapsed
        .iter()
        .copied()
        .map(|value| {
            let delta = duration_ms(value) - mean;
            delta * delta
        })
        .sum::<f64>()
        / count;
    (mean, variance.sqrt())
}
