//! Request building, transport, retry and concurrent dispatch.
mod builder;
mod dispatch;
mod retry;
mod transport;


pub use builder::{AttemptContext, build_request};
pub use dispatch::Dispatcher;
pub use retry::run_lane;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
