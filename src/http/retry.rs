use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{AttemptOutcome, EndpointConfig, Exchange, RequestTemplate};

use super::builder::{AttemptContext, build_request};
use super::transport::Transport;

/// Runs one logical request to a terminal state.
///
/// Every attempt rebuilds the descriptor from the template. Only transport
/// failures are retried, immediately and at most `max_retries` times; any
/// HTTP status counts as a completed exchange. The elapsed time covers all
/// attempts of the lane.
pub async fn run_lane<T>(
    transport: &T,
    config: &EndpointConfig,
    template: &RequestTemplate,
    lane: usize,
) -> AttemptOutcome
where
    T: Transport + ?Sized,
{
    let started = Instant::now();
    let mut context = AttemptContext::first(lane);
    let mut retries: u32 = 0;

    loop {
        let request = build_request(config, template, context);
        match transport.send(&request).await {
            Ok(response) => {
                let success = template
                    .classifier
                    .classify(response.status, &response.body);
                debug!(
                    "Lane {} completed with status {} after {} retries.",
                    lane, response.status, retries
                );
                return AttemptOutcome {
                    lane,
                    exchange: Exchange::Completed {
                        status: response.status,
                        body: response.body,
                        headers: response.headers,
                    },
                    elapsed: started.elapsed(),
                    retry_count: retries,
                    request,
                    success,
                };
            }
            Err(err) if retries < config.max_retries() => {
                debug!(
                    "Lane {} attempt {} failed: {}; retrying.",
                    lane, context.attempt, err
                );
                retries = retries.saturating_add(1);
                context.attempt = context.attempt.saturating_add(1);
            }
            Err(err) => {
                warn!(
                    "Lane {} failed after {} attempts: {}",
                    lane, context.attempt, err
                );
                return AttemptOutcome {
                    lane,
                    exchange: Exchange::Failed {
                        error: err.message,
                    },
                    elapsed: started.elapsed(),
                    retry_count: retries,
                    request,
                    success: false,
                };
            }
        }
    }
}
