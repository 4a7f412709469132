use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use tracing::{error, warn};

use crate::app::run_probe;
use crate::args::{OutputFormat, ProbeArgs};
use crate::config::{apply_config, load_config};
use crate::domain::{EndpointConfig, Expectation, HttpMethod, RequestTemplate};
use crate::error::{AppError, AppResult, ValidationError};
use crate::report::{render_json, render_text};

/// A fully validated run, ready to execute.
#[derive(Debug)]
pub(super) struct RunPlan {
    pub(super) config: EndpointConfig,
    pub(super) template: RequestTemplate,
    pub(super) output_format: OutputFormat,
    pub(super) details: bool,
}

pub(super) fn build_plan(mut args: ProbeArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let Some(url) = args.url.take() else {
        error!("Missing URL (set --url or provide in config).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };

    let config = EndpointConfig::new(
        url,
        args.concurrency.get(),
        Duration::from_secs(args.timeout.get()),
        args.retries,
        headers_map(args.headers),
    )?;

    let classifier = Expectation {
        statuses: args.expect_status,
        body_contains: args.expect_body_contains,
    };
    let template = RequestTemplate::new(
        args.path,
        resolve_method(&args.method),
        headers_map(args.request_headers),
        args.data,
        Arc::new(classifier),
    );

    Ok(RunPlan {
        config,
        template,
        output_format: args.output_format,
        details: args.details,
    })
}

pub(super) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let report = run_probe(plan.config, plan.template).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match plan.output_format {
        OutputFormat::Text => render_text(&mut out, &report, plan.details)?,
        OutputFormat::Json => render_json(&mut out, &report)?,
    }
    out.flush()?;
    Ok(())
}

fn resolve_method(value: &str) -> HttpMethod {
    if HttpMethod::parse(value).is_none() {
        warn!("Unsupported HTTP method '{}'; falling back to GET.", value);
    }
    HttpMethod::parse_lenient(value)
}

/// Later entries win on duplicate keys.
fn headers_map(entries: Vec<(String, String)>) -> BTreeMap<String, String> {
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    fn plan_from(argv: &[&str]) -> AppResult<RunPlan> {
        let matches = ProbeArgs::command().try_get_matches_from(argv)?;
        let args = ProbeArgs::from_arg_matches(&matches)?;
        build_plan(args, &matches)
    }

    #[test]
    fn build_plan_maps_cli_flags() -> AppResult<()> {
        let plan = plan_from(&[
            "apiburst",
            "-u",
            "http://localhost:8080",
            "-p",
            "/tasks",
            "-X",
            "post",
            "-H",
            "Content-Type: application/json",
            "--request-header",
            "X-Custom-Header: custom-value",
            "-d",
            "{}",
            "-c",
            "4",
            "-t",
            "5",
            "-r",
            "1",
            "--expect-status",
            "201",
        ])?;

        let checks = [
            (
                plan.config.base_url() == "http://localhost:8080",
                "Unexpected base url",
            ),
            (plan.config.concurrency() == 4, "Unexpected concurrency"),
            (
                plan.config.timeout() == Duration::from_secs(5),
                "Unexpected timeout",
            ),
            (plan.config.max_retries() == 1, "Unexpected retries"),
            (
                plan.config.default_headers().get("Content-Type").map(String::as_str)
                    == Some("application/json"),
                "Missing default header",
            ),
            (plan.template.path == "/tasks", "Unexpected path"),
            (plan.template.method == HttpMethod::Post, "Unexpected method"),
            (
                plan.template.headers.get("X-Custom-Header").map(String::as_str)
                    == Some("custom-value"),
                "Missing request header",
            ),
            (plan.template.body == "{}", "Unexpected body"),
            (
                plan.template.classifier.classify(201, ""),
                "Expected 201 to pass",
            ),
            (
                !plan.template.classifier.classify(200, ""),
                "Expected 200 to fail with explicit statuses",
            ),
        ];
        for (ok, message) in checks {
            if !ok {
                return Err(AppError::validation(message));
            }
        }
        Ok(())
    }

    #[test]
    fn build_plan_requires_url() -> AppResult<()> {
        match plan_from(&["apiburst", "-c", "2"]) {
            Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
            Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
            Ok(_) => Err(AppError::validation("Expected missing URL error")),
        }
    }

    #[test]
    fn build_plan_rejects_invalid_base_url() -> AppResult<()> {
        match plan_from(&["apiburst", "-u", "not a url"]) {
            Err(AppError::Validation(ValidationError::InvalidUrl { .. })) => Ok(()),
            Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
            Ok(_) => Err(AppError::validation("Expected invalid URL error")),
        }
    }

    #[test]
    fn unknown_method_falls_back_to_get() -> AppResult<()> {
        let plan = plan_from(&["apiburst", "-u", "http://localhost", "-X", "TRACE"])?;
        if plan.template.method != HttpMethod::Get {
            return Err(AppError::validation("Expected GET fallback"));
        }
        Ok(())
    }
}
