//! End-to-end run: dispatch every lane, then aggregate.
mod runner;


pub use runner::{ProbeReport, run_probe, run_with_transport};
