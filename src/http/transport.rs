use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::domain::{EndpointConfig, RequestDescriptor};
use crate::error::{AppError, AppResult, HttpError};

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apiburst/", env!("CARGO_PKG_VERSION"));

/// A response that made it back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
    pub headers: BTreeMap<String, Vec<String>>,
}

/// A network or protocol level failure. Always retryable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message }
    }
}

/// The only capability the dispatch engine needs from HTTP.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one attempt, honoring `request.timeout`.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no response could be obtained.
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport sharing one connection pool across lanes.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the client with the endpoint's timeout as connect timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend or client cannot be initialised.
    pub fn new(config: &EndpointConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout())
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }

    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let mut request_builder = self
            .client
            .request(request.method.into(), &request.url)
            .timeout(request.timeout);

        for (key, value) in &request.headers {
            request_builder = request_builder.header(key, value);
        }
        if let Some(body) = request.body.as_ref() {
            request_builder = request_builder.body(body.clone());
        }

        let response = request_builder.send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.text().await?;

        Ok(TransportResponse {
            status,
            body,
            headers,
        })
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut collected: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_owned())
            .or_default()
            .push(value);
    }
    collected
}
