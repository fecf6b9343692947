//! Target resolution: canonical URL, DNS check, then the redirect trace.

use log::{debug, info};
use url::{Host, Url};

use crate::config::DEFAULT_SCHEME;
use crate::dns::{Resolution, ResolutionStatus, Resolver};
use crate::error_handling::ScanError;
use crate::fetch::RedirectTracer;
use crate::scan::result::{ScanResult, Step};

/// Builds the canonical URL of a raw target.
///
/// The scheme defaults to `http`, a bare host gets the root path and `prefix`
/// (e.g. `www`) is prepended to the host when given.
///
/// # Errors
///
/// Returns the parse error when the target is not a URL even with defaults filled in.
pub fn canonical_url(target: &str, prefix: Option<&str>) -> Result<Url, url::ParseError> {
    let target = target.trim();
    let mut url = if has_scheme(target) {
        Url::parse(target)?
    } else {
        Url::parse(&format!("{DEFAULT_SCHEME}://{target}"))?
    };

    if let Some(prefix) = prefix {
        let host = url.host_str().ok_or(url::ParseError::EmptyHost)?;
        let prefixed = format!("{prefix}.{host}");
        url.set_host(Some(&prefixed))?;
    }
    Ok(url)
}

/// Whether `target` starts with `scheme://`, ignoring any `://` inside its
/// path, query or fragment.
fn has_scheme(target: &str) -> bool {
    match target.find("://") {
        Some(end) => !target[..end].contains(|c| matches!(c, '/' | '?' | '#')),
        None => false,
    }
}

/// Host part of `url` without port or IPv6 brackets.
fn resolvable_host(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => Some(domain.to_string()),
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

/// Scans single targets: DNS through `R`, HTTP through the redirect tracer.
pub struct Scanner<R> {
    resolver: R,
    tracer: RedirectTracer,
}

impl<R: Resolver> Scanner<R> {
    /// Creates a scanner from its two collaborators.
    pub fn new(resolver: R, tracer: RedirectTracer) -> Self {
        Self { resolver, tracer }
    }

    /// The resolver this scanner queries.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Processes one target, optionally with a subdomain prefix.
    ///
    /// Every per-target problem ends up as a failure step in the returned
    /// result.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::UnsupportedResolverStatus` when the resolver answers
    /// with a status outside the known vocabulary; the whole run must stop.
    pub async fn process_target(
        &self,
        target: &str,
        prefix: Option<&str>,
    ) -> Result<ScanResult, ScanError> {
        let url = match canonical_url(target, prefix) {
            Ok(url) => url,
            Err(e) => {
                let mut result = ScanResult::new(target.trim());
                result.fail_with(Step::InvalidTarget(e.to_string()));
                info!("{} {}", result.target(), result.verdict_text());
                return Ok(result);
            }
        };

        info!("Processing {url}");
        let mut result = ScanResult::new(url.as_str());
        let Some(host) = resolvable_host(&url) else {
            result.fail_with(Step::InvalidTarget("missing host".to_string()));
            return Ok(result);
        };

        let resolution = self.resolve(&host).await;
        match resolution.status {
            ResolutionStatus::Ok => {
                let addresses = resolution.joined_addresses();
                if let Some(alias) = resolution.alias {
                    result.add(Step::Alias(alias));
                }
                result.add(Step::Address(addresses));
                result = self.tracer.trace(url, result).await;
            }
            ResolutionStatus::NameNotFound | ResolutionStatus::NoData => {
                result.fail_with(Step::ResolvedNoData(host));
            }
            ResolutionStatus::ServerFailure => {
                result.fail_with(Step::ResolverServerFailure(host));
            }
            ResolutionStatus::Timeout => result.fail_with(Step::ResolverTimeout(host)),
            ResolutionStatus::ProhibitedAlias => {
                result.fail_with(Step::ResolverProhibitedAlias(host));
            }
            ResolutionStatus::Other(detail) => {
                return Err(ScanError::UnsupportedResolverStatus { host, detail });
            }
        }

        info!("{} {}", result.target(), result.verdict_text());
        Ok(result)
    }

    /// Queries `host`, re-querying the alias exactly once on a prohibited alias.
    ///
    /// The alias reported by the first answer is kept for the `ALIAS` step.
    async fn resolve(&self, host: &str) -> Resolution {
        let first = self.resolver.query(host).await;
        if first.status != ResolutionStatus::ProhibitedAlias {
            return first;
        }
        let Some(alias) = first.alias.clone() else {
            return first;
        };

        debug!("{host} is an alias for {alias}, querying the alias");
        let second = self.resolver.query(&alias).await;
        Resolution {
            status: second.status,
            alias: first.alias,
            addresses: second.addresses,
        }
    }
}
