//! DNS resolver initialization.

use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use log::warn;

use crate::config::DNS_TIMEOUT_SECS;
use crate::dns::HickoryResolver;

/// Initializes the DNS resolver for address lookups.
///
/// Uses the system resolver configuration (`/etc/resolv.conf` or the platform
/// equivalent) and falls back to the library defaults when it cannot be read.
pub fn init_resolver() -> HickoryResolver {
    let (config, opts) = match read_system_conf() {
        Ok(conf) => conf,
        Err(e) => {
            warn!("Failed to read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    HickoryResolver::new(TokioAsyncResolver::tokio(config, lookup_opts(opts)))
}

/// Applies the scanner's lookup options on top of `opts`.
///
/// Lookups get a fixed timeout and two attempts. `ndots` is 0 so names are
/// never expanded with search domains, and the answer cache is disabled so
/// every target sees a fresh answer.
fn lookup_opts(mut opts: ResolverOpts) -> ResolverOpts {
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    opts.ndots = 0;
    opts.cache_size = 0;
    opts
}
