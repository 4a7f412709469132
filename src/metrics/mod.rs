//! Statistics over the outcomes of a completed run.
mod stats;

#[cfg(test)]
mod tests;

pub use stats::{StatisticsSnapshot, duration_ms, nearest_rank, rate_x100};
