//! SPARQL JSON result envelope and binding helpers.
//!
//! The endpoint returns `{ "results": { "bindings": [ { var: { "value":
//! ... } } ] } }`; each binding row maps variable names to typed values.
//! Only `value` is consumed here.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::SparqlError;

/// One typed value inside a binding row.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingValue {
    pub value: String,
}

/// One result row: variable name to value.
pub type Binding = HashMap<String, BindingValue>;

/// Top-level SPARQL JSON response envelope.
#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: Results,
}

#[derive(Debug, Deserialize)]
pub struct Results {
    pub bindings: Vec<Binding>,
}

/// Read a required variable from a binding row.
pub fn var<'b>(binding: &'b Binding, name: &'static str) -> Result<&'b str, SparqlError> {
    binding
        .get(name)
        .map(|v| v.value.as_str())
        .ok_or(SparqlError::MissingVariable { variable: name })
}

/// Read an optional variable from a binding row (SPARQL `OPTIONAL`).
pub fn var_opt<'b>(binding: &'b Binding, name: &str) -> Option<&'b str> {
    binding.get(name).map(|v| v.value.as_str())
}

/// The URI fragment after the last occurrence of `marker`.
///
/// Consortium URIs carry their identifiers as fragments, e.g.
/// `http://.../lungmap.owl#LMEX0000000042`.
pub fn fragment_after<'a>(uri: &'a str, marker: &str) -> Result<&'a str, SparqlError> {
    uri.rsplit_once(marker)
        .map(|(_, frag)| frag)
        .filter(|frag| !frag.is_empty())
        .ok_or_else(|| SparqlError::Decode(format!("URI '{uri}' has no '{marker}' fragment")))
}

/// Derive the object-storage key for an image file.
///
/// Layout is `<root>/<stem>/<filename>` where `root` is the experiment
/// URI fragment after `owl#` and `stem` is the filename without its
/// extension.
pub fn s3_key_for(experiment_uri: &str, filename: &str) -> Result<String, SparqlError> {
    let root = fragment_after(experiment_uri, "owl#")?;
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(filename);
    Ok(format!("{root}/{stem}/{filename}"))
}
