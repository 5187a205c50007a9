// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use data_collector::{CollectionConfig, CollectionResult, Collector, CollectorSettings};

const EXIT_FAILURE: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;

/// Run one HTTP data collection and print the result envelope as JSON.
#[derive(Debug, Parser)]
#[command(name = "data-collector", version)]
struct Args {
    /// Collection config file. `-` or no argument reads stdin.
    config: Option<PathBuf>,

    /// Pretty-print the result.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let settings = CollectorSettings::from_os_env();

    if let Err(e) = init_logging(&settings.log_level) {
        eprintln!("COLLECTOR | ERROR | Logging disabled: {e:#}");
    }
    debug!("Logging subsystem enabled");

    let config = match read_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Could not load collection config: {e:#}");
            let result = CollectionResult::failure(format!("{e:#}"));
            print_result(&result, args.pretty);
            return ExitCode::from(EXIT_BAD_INPUT);
        }
    };

    let collector = Collector::from_settings(&settings);
    let result = collector.collect(&config).await;
    if !print_result(&result, args.pretty) {
        return ExitCode::from(EXIT_FAILURE);
    }

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    }
}

fn init_logging(log_level: &str) -> Result<()> {
    let env_filter = format!("h2=off,hyper=off,rustls=off,{log_level}");
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_new(env_filter).context("invalid log level")?)
        .event_format(logger::Formatter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;
    Ok(())
}

fn read_config(path: Option<&Path>) -> Result<CollectionConfig> {
    match path {
        None => parse_config(io::stdin().lock()).context("failed to read config from stdin"),
        Some(path) if path == Path::new("-") => {
            parse_config(io::stdin().lock()).context("failed to read config from stdin")
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            parse_config(file).with_context(|| format!("failed to parse config {}", path.display()))
        }
    }
}

fn parse_config(mut reader: impl Read) -> Result<CollectionConfig> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes the envelope to stdout. Returns false when it could not be
/// serialized.
fn print_result(result: &CollectionResult, pretty: bool) -> bool {
    let rendered = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    match rendered {
        Ok(text) => {
            println!("{text}");
            true
        }
        Err(e) => {
            error!("Failed to serialize collection result: {e}");
            false
        }
    }
}
