//! `Resolver` backed by `hickory-resolver`.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use log::debug;

use super::resolution::{Resolution, ResolutionStatus, Resolver};

/// Looks up A records with a shared `TokioAsyncResolver`.
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    /// Wraps an already configured resolver.
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Resolver for HickoryResolver {
    async fn query(&self, host: &str) -> Resolution {
        // Literal addresses need no lookup
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Resolution::ok(None, vec![ip]);
        }

        match self.resolver.lookup(host, RecordType::A).await {
            Ok(lookup) => {
                let mut alias = None;
                let mut addresses = Vec::new();
                for rdata in lookup.iter() {
                    match rdata {
                        RData::CNAME(cname) => alias = Some(trim_root(&cname.0.to_utf8())),
                        RData::A(a) => addresses.push(IpAddr::V4(a.0)),
                        _ => {}
                    }
                }
                debug!("Resolved {host}: alias={alias:?} addresses={addresses:?}");
                match (addresses.is_empty(), alias) {
                    (false, alias) => Resolution::ok(alias, addresses),
                    (true, Some(alias)) => Resolution::prohibited_alias(alias),
                    (true, None) => Resolution::failed(ResolutionStatus::NoData),
                }
            }
            Err(e) => {
                debug!("Lookup of {host} failed: {e}");
                Resolution::failed(classify_resolve_error(&e))
            }
        }
    }
}

/// Maps a hickory lookup error onto the resolution vocabulary.
pub fn classify_resolve_error(err: &ResolveError) -> ResolutionStatus {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match response_code {
            ResponseCode::NXDomain => ResolutionStatus::NameNotFound,
            ResponseCode::ServFail => ResolutionStatus::ServerFailure,
            ResponseCode::NoError => ResolutionStatus::NoData,
            other => ResolutionStatus::Other(format!("response code {other}")),
        },
        ResolveErrorKind::Timeout => ResolutionStatus::Timeout,
        ResolveErrorKind::NoConnections => ResolutionStatus::ServerFailure,
        ResolveErrorKind::Proto(proto) => match proto.kind() {
            ProtoErrorKind::Timeout => ResolutionStatus::Timeout,
            ProtoErrorKind::Io(_) => ResolutionStatus::ServerFailure,
            _ => ResolutionStatus::Other(proto.to_string()),
        },
        ResolveErrorKind::Io(_) => ResolutionStatus::ServerFailure,
        _ => ResolutionStatus::Other(err.to_string()),
    }
}

fn trim_root(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_string()
}
