//! HTTP redirect chain tracing.
//!
//! Each hop is one GET with redirects disabled. The response is classified and
//! either ends the trace (success or failure) or yields the next URL. The loop
//! carries the `ScanResult` along and hands it back once a terminal state is
//! reached.

use std::time::Duration;

use log::debug;
use reqwest::header::LOCATION;
use reqwest::{StatusCode, Url};

use crate::config::{BODY_PREFIX_LEN, FRAME_MARKER, NO_HOST_MARKER};
use crate::scan::{ScanResult, Step};

/// Classification of a single hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hop {
    /// `200` with an acceptable body; the trace ends successfully
    Accepted,
    /// Valid redirect to `next`
    Redirect {
        /// HTTP status of the hop
        status: u16,
        /// `Location` header as received
        location: String,
        /// `location` joined onto the requested URL
        next: Url,
    },
    /// The trace ends with this failure
    Failed(Step),
}

/// Follows HTTP redirects from a start URL until a terminal state.
pub struct RedirectTracer {
    client: reqwest::Client,
    timeout: Duration,
    max_hops: usize,
}

impl RedirectTracer {
    /// Creates a tracer.
    ///
    /// `client` must not follow redirects itself (see
    /// `initialization::init_client`); `timeout` is only used for the failure
    /// text, the client enforces it.
    pub fn new(client: reqwest::Client, timeout: Duration, max_hops: usize) -> Self {
        Self {
            client,
            timeout,
            max_hops,
        }
    }

    /// Traces `start` and records every hop in `result`.
    ///
    /// A redirect whose `Location` equals the requested URL is a loop. Longer
    /// cycles are not detected as loops; they run into the hop budget.
    pub async fn trace(&self, start: Url, mut result: ScanResult) -> ScanResult {
        let mut current = start;
        let mut redirects = 0usize;
        loop {
            match self.probe(&current).await {
                Hop::Accepted => {
                    result.succeed();
                    return result;
                }
                Hop::Failed(step) => {
                    debug!("{current}: {step}");
                    result.fail_with(step);
                    return result;
                }
                Hop::Redirect {
                    status,
                    location,
                    next,
                } => {
                    debug!("{current}: {status} -> {next}");
                    result.add(Step::Redirect { status, location });
                    redirects += 1;
                    if redirects > self.max_hops {
                        result.fail_with(Step::TooManyRedirects(self.max_hops));
                        return result;
                    }
                    current = next;
                }
            }
        }
    }

    /// Performs one GET and classifies the response.
    async fn probe(&self, url: &Url) -> Hop {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Hop::Failed(self.transport_failure(&e)),
        };

        let status = response.status();
        if status == StatusCode::OK {
            return match read_prefix(response, BODY_PREFIX_LEN).await {
                Ok(body) => inspect_body(&body),
                Err(e) => Hop::Failed(self.transport_failure(&e)),
            };
        }

        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
            return follow_location(url, status.as_u16(), location);
        }

        Hop::Failed(Step::HttpError {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }

    fn transport_failure(&self, error: &reqwest::Error) -> Step {
        if error.is_timeout() {
            Step::ConnectTimeout(self.timeout.as_secs())
        } else {
            Step::IoError(root_cause(error))
        }
    }
}

/// Judges the first bytes of a `200` body.
pub fn inspect_body(body: &[u8]) -> Hop {
    let text = String::from_utf8_lossy(body);
    if text.contains(NO_HOST_MARKER) {
        Hop::Failed(Step::InvalidRedirector)
    } else if text.contains(FRAME_MARKER) {
        Hop::Failed(Step::FrameRedirect)
    } else {
        Hop::Accepted
    }
}

/// Judges a 3xx response for `current` with the given `Location`.
pub fn follow_location(current: &Url, status: u16, location: Option<String>) -> Hop {
    let Some(location) = location else {
        return Hop::Failed(Step::RedirectWithoutLocation(status));
    };
    if location == current.as_str() {
        return Hop::Failed(Step::RedirectLoop(status));
    }
    match current.join(&location) {
        Ok(next) => Hop::Redirect {
            status,
            location,
            next,
        },
        Err(_) => Hop::Failed(Step::RedirectTarget { status, location }),
    }
}

/// Reads at most `limit` bytes of the body.
async fn read_prefix(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::with_capacity(limit);
    while body.len() < limit {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let take = chunk.len().min(limit - body.len());
        body.extend_from_slice(&chunk[..take]);
    }
    Ok(body)
}

/// Message of the innermost error in the source chain.
fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut cause = error;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
