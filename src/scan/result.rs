//! Scan result accumulator.

use std::fmt;

/// One event in the trace of a target.
///
/// `Display` renders the exact report text of the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The name is an alias for this canonical name
    Alias(String),
    /// Space separated addresses the name resolved to
    Address(String),
    /// A 3xx hop with the raw `Location` value
    Redirect {
        /// HTTP status of the hop
        status: u16,
        /// `Location` header as received
        location: String,
    },
    /// The target could not be turned into a URL
    InvalidTarget(String),
    /// NXDOMAIN or no address records for the host
    ResolvedNoData(String),
    /// The resolver reported a server failure for the host
    ResolverServerFailure(String),
    /// The resolver timed out for the host
    ResolverTimeout(String),
    /// The alias re-query still did not yield addresses
    ResolverProhibitedAlias(String),
    /// The HTTP connection timed out (timeout in seconds)
    ConnectTimeout(u64),
    /// Any other transport error, with its innermost cause
    IoError(String),
    /// The body carries the "no host found" marker of a catch-all redirector
    InvalidRedirector,
    /// The body prefix contains frame markup
    FrameRedirect,
    /// 3xx response without `Location`
    RedirectWithoutLocation(u16),
    /// 3xx response whose `Location` is the URL that was requested
    RedirectLoop(u16),
    /// 3xx response whose `Location` cannot be joined onto the current URL
    RedirectTarget {
        /// HTTP status of the hop
        status: u16,
        /// `Location` header as received
        location: String,
    },
    /// More redirects than the hop budget allows
    TooManyRedirects(usize),
    /// Status outside 200 and 3xx
    HttpError {
        /// HTTP status of the hop
        status: u16,
        /// Canonical reason phrase (empty when unknown)
        reason: String,
    },
}

impl Step {
    /// Whether the step ends the trace with a failure.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            Step::Alias(_) | Step::Address(_) | Step::Redirect { .. }
        )
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Alias(name) => write!(f, "ALIAS {name}"),
            Step::Address(addresses) => write!(f, "ADDRESS {addresses}"),
            Step::Redirect { status, location } => write!(f, "REDIRECT {status} {location}"),
            Step::InvalidTarget(detail) => write!(f, "INVALID TARGET {detail}"),
            Step::ResolvedNoData(host) => write!(f, "RESOLVED NODATA {host}"),
            Step::ResolverServerFailure(host) => write!(f, "RESOLVER SERVER_FAILURE {host}"),
            Step::ResolverTimeout(host) => write!(f, "RESOLVER TIMEOUT {host}"),
            Step::ResolverProhibitedAlias(host) => write!(f, "RESOLVER PROHIBITED_ALIAS {host}"),
            Step::ConnectTimeout(secs) => write!(f, "CONNECT TIMEOUT after {secs} seconds"),
            Step::IoError(detail) => write!(f, "IOERROR {detail}"),
            Step::InvalidRedirector => f.write_str("INVALID REDIRECTOR"),
            Step::FrameRedirect => f.write_str("INVALID FRAME REDIRECT"),
            Step::RedirectWithoutLocation(status) => {
                write!(f, "INVALID REDIRECT {status} WITHOUT LOCATION")
            }
            Step::RedirectLoop(status) => write!(f, "INVALID REDIRECT {status} LOOP"),
            Step::RedirectTarget { status, location } => {
                write!(f, "INVALID REDIRECT {status} TARGET {location}")
            }
            Step::TooManyRedirects(max) => write!(f, "TOO MANY REDIRECTS {max}"),
            Step::HttpError { status, reason } => write!(f, "ERROR {status} {reason}"),
        }
    }
}

/// Outcome of scanning one target.
///
/// Steps are append-only and chronological. The verdict starts out `false`, is
/// set by the single success condition, and any failure forces it back to
/// `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    target: String,
    steps: Vec<Step>,
    good: bool,
}

impl ScanResult {
    /// Empty result for `target` (normally the canonical URL).
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            steps: Vec::new(),
            good: false,
        }
    }

    /// Appends an informational step.
    pub fn add(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Appends a terminal failure step and marks the target bad.
    pub fn fail_with(&mut self, step: Step) {
        debug_assert!(step.is_failure(), "{step} is not a failure step");
        self.good = false;
        self.steps.push(step);
    }

    /// Marks the target good.
    pub fn succeed(&mut self) {
        self.good = true;
    }

    /// Target this result describes.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The verdict.
    pub fn is_ok(&self) -> bool {
        self.good
    }

    /// `OK` or `BAD`.
    pub fn verdict_text(&self) -> &'static str {
        if self.good {
            "OK"
        } else {
            "BAD"
        }
    }

    /// Steps in the order they happened.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps rendered as report text.
    pub fn step_texts(&self) -> Vec<String> {
        self.steps.iter().map(Step::to_string).collect()
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.verdict_text())?;
        for step in &self.steps {
            write!(f, "\n {step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_is_bad_and_empty() {
        let result = ScanResult::new("http://example.com/");
        assert!(!result.is_ok());
        assert_eq!(result.verdict_text(), "BAD");
        assert!(result.steps().is_empty());
        assert_eq!(result.target(), "http://example.com/");
    }

    #[test]
    fn test_failure_overrides_success() {
        let mut result = ScanResult::new("http://example.com/");
        result.succeed();
        assert!(result.is_ok());
        result.fail_with(Step::FrameRedirect);
        assert!(!result.is_ok());
        assert_eq!(result.step_texts(), vec!["INVALID FRAME REDIRECT"]);
    }

    #[test]
    fn test_step_texts() {
        let cases = [
            (Step::Alias("a.example.net".into()), "ALIAS a.example.net"),
            (
                Step::Address("192.0.2.1 192.0.2.2".into()),
                "ADDRESS 192.0.2.1 192.0.2.2",
            ),
            (
                Step::Redirect {
                    status: 301,
                    location: "http://example.com/new".into(),
                },
                "REDIRECT 301 http://example.com/new",
            ),
            (
                Step::ResolvedNoData("example.com".into()),
                "RESOLVED NODATA example.com",
            ),
            (
                Step::ResolverServerFailure("example.com".into()),
                "RESOLVER SERVER_FAILURE example.com",
            ),
            (
                Step::ResolverTimeout("example.com".into()),
                "RESOLVER TIMEOUT example.com",
            ),
            (Step::ConnectTimeout(3), "CONNECT TIMEOUT after 3 seconds"),
            (Step::InvalidRedirector, "INVALID REDIRECTOR"),
            (
                Step::RedirectWithoutLocation(302),
                "INVALID REDIRECT 302 WITHOUT LOCATION",
            ),
            (Step::RedirectLoop(301), "INVALID REDIRECT 301 LOOP"),
            (
                Step::HttpError {
                    status: 404,
                    reason: "Not Found".into(),
                },
                "ERROR 404 Not Found",
            ),
        ];
        for (step, text) in cases {
            assert_eq!(step.to_string(), text);
        }
    }

    #[test]
    #[should_panic(expected = "is not a failure step")]
    #[cfg(debug_assertions)]
    fn test_fail_with_rejects_trace_step() {
        let mut result = ScanResult::new("http://example.com/");
        result.fail_with(Step::Address("192.0.2.1".into()));
    }

    #[test]
    fn test_only_trace_steps_are_not_failures() {
        assert!(!Step::Alias("x".into()).is_failure());
        assert!(!Step::Address("x".into()).is_failure());
        assert!(!Step::Redirect {
            status: 302,
            location: "/".into()
        }
        .is_failure());
        assert!(Step::FrameRedirect.is_failure());
        assert!(Step::ResolverTimeout("x".into()).is_failure());
    }

    #[test]
    fn test_display_lists_steps_indented() {
        let mut result = ScanResult::new("http://example.com/");
        result.add(Step::Address("192.0.2.1".into()));
        result.succeed();
        assert_eq!(
            result.to_string(),
            "http://example.com/ OK\n ADDRESS 192.0.2.1"
        );
    }
}
