/// Errors from the knowledge-graph gateway.
///
/// `NoResults` and `TooManyResults` are expected-absence conditions
/// surfaced as values so callers can distinguish them from transport
/// failures; none of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum SparqlError {
    #[error("SPARQL request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode SPARQL response: {0}")]
    Decode(String),

    #[error("No results found for {context}")]
    NoResults { context: String },

    #[error("Too many results for {context}: expected 1, got {count}")]
    TooManyResults { context: String, count: usize },

    #[error("Binding is missing variable '{variable}'")]
    MissingVariable { variable: &'static str },
}
