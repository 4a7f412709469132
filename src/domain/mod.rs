//! Immutable run inputs and the per-lane outcome record.
mod classifier;
mod endpoint;
mod headers;
mod method;
mod outcome;
mod request;
mod template;


pub use classifier::{Expectation, StatusRange, SuccessClassifier};
pub use endpoint::EndpointConfig;
pub use headers::{validate_header, validate_headers};
pub use method::HttpMethod;
pub use outcome::{AttemptOutcome, Exchange};
pub use request::RequestDescriptor;
pub use template::RequestTemplate;
