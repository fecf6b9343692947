//! Resolver capability used by the target resolver.
//!
//! The scanner only needs one question answered per host: does it have an
//! address, and under which canonical name. `Resolver` is that capability so a
//! fake can stand in for real DNS in tests.

use std::net::IpAddr;

use async_trait::async_trait;
use strum_macros::Display;

/// Outcome class of a single address query.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionStatus {
    /// Addresses were found
    Ok,
    /// The name is an alias whose target was not resolved; query the alias again
    ProhibitedAlias,
    /// NXDOMAIN
    NameNotFound,
    /// The name exists but has no address records
    NoData,
    /// The server failed (SERVFAIL) or no server could be reached
    ServerFailure,
    /// The query timed out
    Timeout,
    /// Any condition outside the vocabulary above, with the resolver's detail
    Other(String),
}

/// Answer to one address query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Outcome class
    pub status: ResolutionStatus,
    /// Canonical name when the queried name is an alias
    pub alias: Option<String>,
    /// Addresses in answer order
    pub addresses: Vec<IpAddr>,
}

impl Resolution {
    /// Successful answer.
    pub fn ok(alias: Option<String>, addresses: Vec<IpAddr>) -> Self {
        Self {
            status: ResolutionStatus::Ok,
            alias,
            addresses,
        }
    }

    /// Answer without addresses.
    pub fn failed(status: ResolutionStatus) -> Self {
        Self {
            status,
            alias: None,
            addresses: Vec::new(),
        }
    }

    /// Alias answer that has to be re-queried under `alias`.
    pub fn prohibited_alias(alias: impl Into<String>) -> Self {
        Self {
            status: ResolutionStatus::ProhibitedAlias,
            alias: Some(alias.into()),
            addresses: Vec::new(),
        }
    }

    /// Addresses joined by single spaces, as shown in `ADDRESS` steps.
    pub fn joined_addresses(&self) -> String {
        self.addresses
            .iter()
            .map(IpAddr::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Address lookup capability.
///
/// Implementations must not cache between calls or depend on call order; one
/// instance is shared by every target of a run.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Looks up the addresses of `host`.
    async fn query(&self, host: &str) -> Resolution;
}
