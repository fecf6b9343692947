// Shared test helpers: a table driven resolver and config construction.

use std::collections::HashMap;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use dns_web_scanner::dns::{Resolution, ResolutionStatus, Resolver};
use dns_web_scanner::Config;
use tempfile::NamedTempFile;

/// Resolver answering from a fixed table; unknown hosts are NXDOMAIN.
#[derive(Default)]
pub struct TableResolver {
    answers: HashMap<String, Resolution>,
}

impl TableResolver {
    pub fn with(mut self, host: &str, resolution: Resolution) -> Self {
        self.answers.insert(host.to_string(), resolution);
        self
    }

    /// Resolver that maps `127.0.0.1` to itself, so mock servers are reachable.
    pub fn loopback() -> Self {
        Self::default().with(
            "127.0.0.1",
            Resolution::ok(None, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]),
        )
    }
}

#[async_trait]
impl Resolver for TableResolver {
    async fn query(&self, host: &str) -> Resolution {
        self.answers
            .get(host)
            .cloned()
            .unwrap_or_else(|| Resolution::failed(ResolutionStatus::NameNotFound))
    }
}

/// Config for `targets` with test friendly defaults.
#[allow(dead_code)] // Not every test file uses every helper
pub fn create_test_config(targets: &[String]) -> Config {
    Config {
        targets: targets.to_vec(),
        timeout_seconds: 3,
        user_agent: "dns_web_scanner_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Writes a `;`-separated CSV file with a header line and one target per row.
#[allow(dead_code)]
pub fn write_csv_targets(targets: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "Target;Comment").expect("Failed to write header");
    for target in targets {
        writeln!(file, "{};scanned by test", target).expect("Failed to write target");
    }
    file.flush().expect("Failed to flush file");
    file
}
