use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Cannot compute statistics over zero outcomes.")]
    EmptyOutcomes,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
