//! dns_web_scanner library: DNS and web endpoint validation
//!
//! For every target (host, host:port or URL) the scanner resolves the host,
//! requests the canonical URL and follows HTTP redirects hop by hop. Each target
//! ends up with an ordered list of steps and an OK/BAD verdict. Frame based
//! redirects, catch-all redirector pages, redirect loops and broken redirects
//! count as failures.
//!
//! # Example
//!
//! ```no_run
//! use dns_web_scanner::{run_scan, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     targets: vec!["example.com".to_string()],
//!     ..Default::default()
//! };
//!
//! let mut out = std::io::stdout();
//! let report = run_scan(&config, &mut out, CancellationToken::new()).await?;
//! println!("{} OK, {} BAD", report.ok, report.bad);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod scan;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ReportFormat};
pub use error_handling::{InitializationError, ScanError};
pub use run::{run_scan, run_scan_with, ScanReport};
pub use scan::{ScanResult, Step};

// Internal run module (wires configuration, resolver, client and report together)
mod run {
    use std::io::Write;
    use std::time::Instant;

    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::config::Config;
    use crate::dns::Resolver;
    use crate::error_handling::ScanError;
    use crate::export::write_report;
    use crate::fetch::RedirectTracer;
    use crate::initialization::{init_client, init_resolver};
    use crate::scan::{run_batch, ScanResult, Scanner};

    /// Results of a scan run.
    #[derive(Debug, Clone)]
    pub struct ScanReport {
        /// Per-target results in input order
        pub results: Vec<ScanResult>,
        /// Number of targets with an OK verdict
        pub ok: usize,
        /// Number of targets with a BAD verdict
        pub bad: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a scan with the system DNS resolver and writes the report to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, a CSV source is
    /// broken, the resolver reports an unsupported status, the run is cancelled
    /// (nothing is written then) or the report cannot be written.
    pub async fn run_scan<W: Write>(
        config: &Config,
        sink: &mut W,
        cancel: CancellationToken,
    ) -> Result<ScanReport, ScanError> {
        run_scan_with(config, init_resolver(), sink, cancel).await
    }

    /// Like [`run_scan`], with a caller supplied resolver.
    ///
    /// # Errors
    ///
    /// See [`run_scan`].
    pub async fn run_scan_with<R: Resolver, W: Write>(
        config: &Config,
        resolver: R,
        sink: &mut W,
        cancel: CancellationToken,
    ) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let client = init_client(config)?;
        let tracer = RedirectTracer::new(client, config.timeout(), config.max_redirects);
        let scanner = Scanner::new(resolver, tracer);

        let results = run_batch(&scanner, &config.targets, config.with_www, &cancel).await?;
        write_report(config.report_format(), &results, sink)?;

        let ok = results.iter().filter(|r| r.is_ok()).count();
        let report = ScanReport {
            bad: results.len() - ok,
            ok,
            results,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
        info!(
            "Scanned {} target{} ({} OK, {} BAD) in {:.1}s",
            report.results.len(),
            if report.results.len() == 1 { "" } else { "s" },
            report.ok,
            report.bad,
            report.elapsed_seconds
        );
        Ok(report)
    }
}
