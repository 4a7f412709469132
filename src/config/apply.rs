use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, ProbeArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line are kept; everything else is taken from
/// the config when present.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout
    {
        args.timeout = ensure_positive_u64(timeout, "timeout")?;
    }

    if !is_cli(matches, "retries")
        && let Some(retries) = config.retries
    {
        args.retries = retries;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_header_entries(headers)?;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "details")
        && let Some(details) = config.details
    {
        args.details = details;
    }

    let Some(request) = config.request.as_ref() else {
        return Ok(());
    };

    if !is_cli(matches, "path")
        && let Some(path) = request.path.clone()
    {
        args.path = path;
    }

    if !is_cli(matches, "method")
        && let Some(method) = request.method.clone()
    {
        args.method = method;
    }

    if !is_cli(matches, "request_headers")
        && let Some(headers) = request.headers.as_ref()
    {
        args.request_headers = parse_header_entries(headers)?;
    }

    if !is_cli(matches, "data")
        && let Some(data) = request.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "expect_status")
        && let Some(statuses) = request.expect_status.clone()
    {
        args.expect_status = statuses;
    }

    if !is_cli(matches, "expect_body_contains")
        && let Some(fragment) = request.expect_body_contains.clone()
    {
        args.expect_body_contains = Some(fragment);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn parse_header_entries(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}
