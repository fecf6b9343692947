//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_web_scanner` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Output sink selection (stdout or `--output FILE`)
//! - Interrupt handling and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use tokio_util::sync::CancellationToken;

use dns_web_scanner::initialization::init_logger_with;
use dns_web_scanner::{run_scan, Config, ScanError};

/// Exit code for fatal errors (unsupported resolver status, broken input, I/O)
const EXIT_FATAL: i32 = 2;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = run(config).await {
        eprintln!("dns_web_scanner error: {:#}", e);
        process::exit(EXIT_FATAL);
    }
}

async fn run(config: Config) -> Result<()> {
    init_logger_with(config.effective_log_level(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let mut sink: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    // Ctrl-C aborts the batch at once; nothing is reported
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match run_scan(&config, &mut sink, cancel).await {
        Ok(_) => Ok(()),
        Err(ScanError::Interrupted) => {
            warn!("Interrupted, no report written");
            Ok(())
        }
        Err(e) => Err(e).context("Scan failed"),
    }
}
