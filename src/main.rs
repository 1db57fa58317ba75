//! # chatpulse CLI
//!
//! Command-line interface for the chatpulse library.

use std::io::Write;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatpulse::ChatpulseError;
use chatpulse::analytics::Analyzer;
use chatpulse::cli::{Args, OutputFormat};
use chatpulse::core::{records_to_jsonl, refilter, to_json, write_json, write_jsonl};
use chatpulse::parser::ChatParser;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.log_level());

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for JSON.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatpulseError> {
    let total_start = Instant::now();
    let filter_config = args.filter_config()?;

    info!(input = %args.input, format = %args.format, "chatpulse v{}", env!("CARGO_PKG_VERSION"));

    let parse_start = Instant::now();
    let parser = ChatParser::with_config(args.parser_config());
    let parsed = parser.parse(Path::new(&args.input))?.ensure_not_empty()?;
    info!(
        records = parsed.records.len(),
        participants = parsed.participants.len(),
        date_order = %parsed.date_format.order,
        elapsed_ms = parse_start.elapsed().as_millis() as u64,
        "parsed"
    );

    let parsed = if filter_config.is_active() {
        let filtered = refilter(&parsed, &filter_config).ensure_not_empty()?;
        info!(records = filtered.records.len(), "filtered");
        filtered
    } else {
        parsed
    };

    match (args.format, args.output.as_deref()) {
        (OutputFormat::Summary, output) => {
            let summary = Analyzer::new(&parsed, args.analysis_config()).summary();
            match output {
                Some(path) => write_json(&summary, path, !args.compact)?,
                None => print_stdout(&to_json(&summary, !args.compact)?)?,
            }
        }
        (OutputFormat::Records, Some(path)) => write_jsonl(&parsed.records, path)?,
        (OutputFormat::Records, None) => {
            let jsonl = records_to_jsonl(&parsed.records)?;
            print_stdout(jsonl.trim_end_matches('\n'))?;
        }
    }

    if let Some(ref path) = args.output {
        eprintln!("✅ Done! Output saved to {}", path);
    }
    info!(elapsed_ms = total_start.elapsed().as_millis() as u64, "finished");

    Ok(())
}

fn print_stdout(text: &str) -> Result<(), ChatpulseError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}
