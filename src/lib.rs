//! Core library for the `apiburst` CLI.
//!
//! `apiburst` fires a burst of identical HTTP requests at one endpoint, one
//! per concurrency lane, retries transport failures within a fixed budget,
//! and reports latency statistics. The modules here are the building blocks
//! used by the binary: argument and config parsing, the request builder and
//! transport, the lane dispatcher, statistics aggregation, and report
//! rendering.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;

mod logger;
