// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use canal::config::RuntimeBuilder;
use canal::observability::messages::pipeline::PipelineRunStarted;
use canal::observability::messages::StructuredLog;
use serde_json::Value;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: canal <pipeline.yaml> [input-file]

Pushes every line of input-file (stdin when omitted) into the pipeline's first
source as a JSON string, then shuts the pipeline down.

Log output goes to stderr; set RUST_LOG (e.g. RUST_LOG=canal=debug) to see more.";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    match run(&args[0], args.get(1).map(String::as_str)) {
        Ok(count) => {
            tracing::info!(lines = count, "pipeline finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Feed every input line through the pipeline; returns the number of lines pushed.
fn run(config_path: &str, input_path: Option<&str>) -> Result<usize> {
    let mut pipeline = RuntimeBuilder::from_file(config_path)
        .with_context(|| format!("failed to build pipeline from '{config_path}'"))?;
    let source = pipeline
        .source_names()
        .next()
        .map(str::to_owned)
        .context("pipeline declares no sources")?;

    let start_msg = PipelineRunStarted {
        config: config_path,
        source: &source,
    };
    let span = start_msg.span("pipeline_run");
    let _guard = span.enter();
    start_msg.log();

    let reader: Box<dyn BufRead> = match input_path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open input '{path}'"))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut count = 0;
    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        pipeline
            .send(&source, Value::String(line))
            .with_context(|| format!("pipeline failed on input line {}", count + 1))?;
        count += 1;
    }

    pipeline.terminate().context("pipeline did not shut down cleanly")?;
    Ok(count)
}
