mod plan;

use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::ProbeArgs;
use crate::config::DEFAULT_CONFIG_FILES;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses the command line, validates the run and executes it.
///
/// The whole plan is validated before the runtime is built, so a bad URL,
/// header or config value never reaches dispatch.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, or when the
/// report cannot be written. Failed requests are reported, not returned.
pub fn run() -> AppResult<()> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    if is_bare_invocation(&raw_args) && !has_default_config() {
        ProbeArgs::command().print_help()?;
        println!();
        return Ok(());
    }

    let (args, matches) = parse_args(raw_args)?;
    crate::logger::init_logging(args.verbose, args.no_color);
    let plan = build_plan(args, &matches)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(execute_plan(plan))
}

fn parse_args(raw_args: Vec<OsString>) -> AppResult<(ProbeArgs, ArgMatches)> {
    let matches = ProbeArgs::command().get_matches_from(raw_args);
    let args = ProbeArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

/// No arguments at all, or only a lone `--`.
fn is_bare_invocation(raw_args: &[OsString]) -> bool {
    match raw_args {
        [] | [_] => true,
        [_, second] => second == "--",
        [_, _, _, ..] => false,
    }
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
