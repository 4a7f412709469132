use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::domain::{AttemptOutcome, EndpointConfig, Exchange, RequestTemplate};

use super::builder::{AttemptContext, build_request};
use super::retry::run_lane;
use super::transport::Transport;

/// Fans one template out to `concurrency` independent lanes.
pub struct Dispatcher<T: ?Sized> {
    transport: Arc<T>,
    config: Arc<EndpointConfig>,
}

impl<T> Dispatcher<T>
where
    T: Transport + ?Sized + 'static,
{
    #[must_use]
    pub const fn new(transport: Arc<T>, config: Arc<EndpointConfig>) -> Self {
        Self { transport, config }
    }

    /// Runs every lane to completion and returns one outcome per lane, in
    /// launch order.
    ///
    /// A lane never aborts its siblings: failures, including a panicking lane
    /// task, are recorded as unsuccessful outcomes.
    pub async fn run(&self, template: &Arc<RequestTemplate>) -> Vec<AttemptOutcome> {
        let lanes = self.config.concurrency();
        let started = Instant::now();
        info!(
            "Dispatching {} {} {}{} with up to {} retries per lane.",
            lanes,
            template.method,
            self.config.base_url(),
            template.path,
            self.config.max_retries()
        );

        let mut pool = LanePool::new(lanes);
        for lane in 1..=lanes {
            let transport = Arc::clone(&self.transport);
            let config = Arc::clone(&self.config);
            let lane_template = Arc::clone(template);
            pool.spawn(lane, async move {
                run_lane(transport.as_ref(), &config, &lane_template, lane).await
            });
        }

        let mut outcomes = Vec::with_capacity(lanes);
        while let Some((lane, joined)) = pool.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!("Lane {} task did not complete: {}", lane, err);
                    self.lost_lane(template, lane, &err, started.elapsed())
                }
            };
            outcomes.push(outcome);
        }

        debug!(
            "All {} lanes finished in {}ms.",
            outcomes.len(),
            started.elapsed().as_millis()
        );
        outcomes
    }

    fn lost_lane(
        &self,
        template: &RequestTemplate,
        lane: usize,
        err: &JoinError,
        elapsed: Duration,
    ) -> AttemptOutcome {
        AttemptOutcome {
            lane,
            exchange: Exchange::Failed {
                error: format!("lane task aborted: {}", err),
            },
            elapsed,
            retry_count: 0,
            request: build_request(&self.config, template, AttemptContext::first(lane)),
            success: false,
        }
    }
}

/// Lane tasks of a single run. Capacity equals the lane count, so no lane
/// waits for a slot; dropping the pool aborts lanes that were not joined.
struct LanePool {
    permits: Arc<Semaphore>,
    handles: VecDeque<(usize, JoinHandle<AttemptOutcome>)>,
}

impl LanePool {
    fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            handles: VecDeque::with_capacity(capacity),
        }
    }

    fn spawn<F>(&mut self, lane: usize, lane_future: F)
    where
        F: Future<Output = AttemptOutcome> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await;
            lane_future.await
        });
        self.handles.push_back((lane, handle));
    }

    async fn join_next(&mut self) -> Option<(usize, Result<AttemptOutcome, JoinError>)> {
        let (lane, handle) = self.handles.pop_front()?;
        Some((lane, handle.await))
    }
}

impl Drop for LanePool {
    fn drop(&mut self) {
        for (_, handle) in &self.handles {
            handle.abort();
        }
    }
}
