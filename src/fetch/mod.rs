//! HTTP probing.
//!
//! This module provides the redirect tracer: GET a URL, classify the response
//! and follow redirects hop by hop until success or failure.

mod redirects;

// Re-export public API
pub use redirects::{follow_location, inspect_body, Hop, RedirectTracer};
