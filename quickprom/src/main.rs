//! # quickprom
//!
//! A CLI tool for reading Prometheus query results in a terminal.
//!
//! ## Overview
//!
//! quickprom is built on top of quickpromlib. It reads a query response
//! document, hoists the labels every item shares, picks a number and
//! timestamp format that fits the data and prints the result as a table or
//! list. With `--json` it writes the raw result back out as JSON instead.
//!
//! ## Usage
//!
//! ```bash
//! # Render a saved response
//! quickprom response.json
//!
//! # Pipe straight from the HTTP API
//! curl -s 'http://localhost:9090/api/v1/query?query=up' | quickprom
//!
//! # Range vectors as one column per timestamp
//! curl -s 'http://localhost:9090/api/v1/query_range?...' | quickprom --range-table
//!
//! # Machine-readable output, timestamps in UTC
//! quickprom response.json --json
//! quickprom response.json --utc
//! ```

mod options;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::builder::FalseyValueParser;
use clap::{Arg, ArgAction, Command};
use console::Term;
use quickpromlib::{read_response, RawResult, Renderer};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use options::CliOptions;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("quickprom")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render Prometheus query results as compact terminal tables or JSON")
        .arg(
            Arg::new("file").help("Query response document (reads stdin when absent or '-')"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .env("QUICKPROM_JSON")
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new())
                .help("Output the raw result as JSON"),
        )
        .arg(
            Arg::new("range-table")
                .short('b')
                .long("range-table")
                .env("QUICKPROM_RANGE_TABLE")
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new())
                .help("Render range vectors as a table with one column per timestamp"),
        )
        .arg(
            Arg::new("utc")
                .long("utc")
                .env("QUICKPROM_UTC")
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new())
                .help("Display timestamps in UTC instead of local time"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .env("QUICKPROM_COLOR")
                .value_parser(["auto", "always", "never"])
                .default_value("auto")
                .help("When to use bold text and bordered tables"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (can be specified multiple times)"),
        )
}

/// Install the stderr log subscriber.
///
/// `QUICKPROM_LOG` or `RUST_LOG` win over `-v`.
fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("QUICKPROM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(Term::stderr().is_term())
        .with_target(false)
        .try_init();
}

fn read_input(path: Option<&str>) -> anyhow::Result<RawResult> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open '{path}'"))?;
            read_response(BufReader::new(file))
                .with_context(|| format!("cannot read query response from '{path}'"))
        }
        None => read_response(io::stdin().lock()).context("cannot read query response from stdin"),
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let raw = read_input(options.input.as_deref())?;
    let terminal = options.color.terminal(Term::stdout().is_term());
    debug!(result_type = %raw.result_type(), ?terminal, "input decoded");

    let renderer = Renderer::for_terminal(terminal, options.render);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render_raw(&raw, &mut out)?;
    out.flush().context("cannot write output")?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let options = CliOptions::from_matches(&matches);
    init_logging(options.verbosity);

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
