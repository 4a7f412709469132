use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use super::RequestDescriptor;

/// What the final attempt of a lane produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// A response arrived, whatever its status code.
    Completed {
        status: u16,
        body: String,
        headers: BTreeMap<String, Vec<String>>,
    },
    /// The transport failed on the last permitted attempt.
    Failed { error: String },
}

/// The single result of one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOutcome {
    /// 1-based lane number, matching launch order.
    pub lane: usize,
    pub exchange: Exchange,
    /// From the first attempt's start to the last attempt's completion.
    pub elapsed: Duration,
    pub retry_count: u32,
    /// The descriptor sent on the last attempt.
    pub request: RequestDescriptor,
    pub success: bool,
}

impl AttemptOutcome {
    /// HTTP status of a completed exchange; `None` marks a transport failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match &self.exchange {
            Exchange::Completed { status, .. } => Some(*status),
            Exchange::Failed { .. } => None,
        }
    }

    /// Response body, or the `Error: ...` description for a failure.
    #[must_use]
    pub fn body(&self) -> Cow<'_, str> {
        match &self.exchange {
            Exchange::Completed { body, .. } => Cow::Borrowed(body),
            Exchange::Failed { error } => Cow::Owned(format!("Error: {}", error)),
        }
    }

    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        matches!(self.exchange, Exchange::Failed { .. })
    }
}
