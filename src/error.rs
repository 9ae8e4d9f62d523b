use thiserror::Error;

/// Every failure the pipeline can surface. All of them end the request:
/// no partial result is returned alongside an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LockerError {
    /// Config file unreadable or unparseable, or credentials missing.
    #[error("config error: {0}")]
    Config(String),
    /// Module catalog unreadable, invalid, or carrying unknown fields.
    #[error("module catalog error: {0}")]
    Catalog(String),
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to decode statement page from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

pub type Result<T> = std::result::Result<T, LockerError>;
