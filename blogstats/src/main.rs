//! # blogstats
//!
//! A CLI tool that reports statistics for a Jekyll-style blog.
//!
//! ## Overview
//!
//! blogstats is built on top of blogstatslib. It loads the posts (and drafts)
//! of a site source directory, computes a statistics record and prints it as a
//! text report or as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Report on the site in the current directory
//! blogstats
//!
//! # Report on another site, counting drafts too
//! blogstats path/to/site --drafts
//!
//! # Only posts tagged rust or wasm
//! blogstats --tags rust,wasm
//!
//! # Raw JSON on stdout
//! blogstats --json
//!
//! # Print the report and save the JSON to _data/stats.json
//! blogstats --save
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`);
//! set `RUST_LOG_FORMAT=json` for JSON log lines.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use blogstatslib::{load_site, CalculateOptions, FilterConfig, LoadOptions, StatsCalculator};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod render;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("blogstats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Display statistics for a Jekyll-style blog")
        .arg(
            Arg::new("source")
                .help("Site source directory (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output raw JSON to stdout"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .action(ArgAction::SetTrue)
                .help("Save stats to _data/stats.json (ignored with --json)"),
        )
        .arg(
            Arg::new("drafts")
                .short('D')
                .long("drafts")
                .action(ArgAction::SetTrue)
                .help("Include drafts in calculations"),
        )
        .arg(
            Arg::new("tags")
                .short('t')
                .long("tags")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Only count posts with any of these tags (comma-separated)"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include post files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude post files matching glob pattern"),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig> {
    let filter = FilterConfig::new()
        .include_many(&glob_patterns(matches, "include"))?
        .exclude_many(&glob_patterns(matches, "exclude"))?;

    Ok(filter)
}

fn glob_patterns<'a>(matches: &'a ArgMatches, id: &str) -> Vec<&'a str> {
    matches
        .get_many::<String>(id)
        .map(|v| v.map(String::as_str).collect())
        .unwrap_or_default()
}

/// Extract tag filter from matches
fn extract_tags(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("tags")
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

/// Handler for the stats command, returning what to print on stdout
fn stats_handler(matches: &ArgMatches) -> Result<String> {
    let source = matches
        .get_one::<String>("source")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let source = Path::new(source);

    info!(source = %source.display(), "loading site");
    let site = load_site(source, &LoadOptions::new().filter(build_filter(matches)?))?;

    let options = CalculateOptions::new()
        .include_drafts(matches.get_flag("drafts"))
        .filter_tags(extract_tags(matches));
    let record = StatsCalculator::new(&site, options).calculate();

    if matches.get_flag("json") {
        let mut json = render::render_json(&record)?;
        json.push('\n');
        return Ok(json);
    }

    let mut output = render::render_text(&record);
    if matches.get_flag("save") {
        let path = render::save_stats(source, &record)?;
        output.push_str(&format!("Stats saved to {}\n", path.display()));
    }

    Ok(output)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();

    let matches = build_command().get_matches();

    match stats_handler(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").for_stderr().red().bold());
            ExitCode::FAILURE
        }
    }
}
