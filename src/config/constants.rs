//! Configuration constants.
//!
//! Timeouts, limits and the marker strings the redirect tracer looks for.

/// HTTP connection timeout in seconds (applies to every hop)
pub const HTTP_TIMEOUT_SECS: u64 = 3;

/// Maximum number of redirect hops followed for a single target.
///
/// Only exact self-redirects are reported as loops; this budget stops longer
/// cycles (A -> B -> A) from running forever.
pub const MAX_REDIRECT_HOPS: usize = 20;

/// Number of body bytes inspected on a `200` response
pub const BODY_PREFIX_LEN: usize = 200;

/// Body text served by catch-all redirector hosts that have no mapping for the name
pub const NO_HOST_MARKER: &str = "Sorry, no Host found";

/// Body text that gives away a frame based redirect (`<frameset>`, `<iframe>`, ...)
pub const FRAME_MARKER: &str = "frame";

/// Default scheme for targets given without one
pub const DEFAULT_SCHEME: &str = "http";

/// Subdomain prepended to CSV targets when `--with-www` is set
pub const WWW_PREFIX: &str = "www";

/// Field delimiter of CSV input and CSV reports
pub const CSV_DELIMITER: u8 = b';';

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("dns_web_scanner/", env!("CARGO_PKG_VERSION"));

/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
