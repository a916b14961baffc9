//! Knowledge-graph gateway.
//!
//! Issues templated SPARQL queries against the consortium endpoint and
//! flattens the JSON result bindings into plain records consumed by the
//! ingest path. No retries: every error propagates to the caller as a
//! tagged [`SparqlError`].

pub mod client;
pub mod error;
pub mod queries;
pub mod response;

pub use client::{MultipleResults, SparqlClient};
pub use error::SparqlError;
