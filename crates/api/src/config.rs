use lungmap_sparql::MultipleResults;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SPARQL endpoint URL for the consortium knowledge graph.
    pub sparql_endpoint: String,
    /// What to do when a one-row SPARQL query binds several rows.
    pub sparql_on_multiple: MultipleResults,
    /// S3 bucket holding the source image binaries.
    pub s3_bucket: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                        |
    /// |------------------------|------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                      |
    /// | `PORT`                 | `3000`                                         |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                           |
    /// | `SPARQL_ENDPOINT`      | `https://testdata.lungmap.net/sparql`          |
    /// | `SPARQL_ON_MULTIPLE`   | `fail-fast` (or `first-wins`)                  |
    /// | `S3_BUCKET`            | `lungmap-breath-data`                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sparql_endpoint = std::env::var("SPARQL_ENDPOINT")
            .unwrap_or_else(|_| "https://testdata.lungmap.net/sparql".into());

        let sparql_on_multiple = match std::env::var("SPARQL_ON_MULTIPLE")
            .unwrap_or_else(|_| "fail-fast".into())
            .as_str()
        {
            "fail-fast" => MultipleResults::FailFast,
            "first-wins" => MultipleResults::FirstWins,
            other => panic!("SPARQL_ON_MULTIPLE must be fail-fast or first-wins, got {other}"),
        };

        let s3_bucket =
            std::env::var("S3_BUCKET").unwrap_or_else(|_| "lungmap-breath-data".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            sparql_endpoint,
            sparql_on_multiple,
            s3_bucket,
        }
    }
}
