//! DNS resolution.
//!
//! This module provides the resolver adapter used by the scanner:
//! - `Resolver`: the address lookup capability (one query per call, no caching)
//! - `Resolution` / `ResolutionStatus`: what a query answered
//! - `HickoryResolver`: the production implementation on `hickory-resolver`

mod hickory;
mod resolution;

// Re-export public API
pub use hickory::{classify_resolve_error, HickoryResolver};
pub use resolution::{Resolution, ResolutionStatus, Resolver};
