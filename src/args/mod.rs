//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::ProbeArgs;
pub use types::{OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use parsers::parse_header;
