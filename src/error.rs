//! Error types for scribe operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching, rendering, caching or generating pages.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: FetchFailure },

    #[error("Malformed block {id}: {reason}")]
    MalformedBlock { id: String, reason: String },

    #[error("Missing page property: {0}")]
    MissingProperty(String),

    #[error("Invalid page property {name}: {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("Corrupt cache file {}: {source}", path.display())]
    CacheCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Unsupported model: {0} (expected a gemma or gemini model)")]
    UnsupportedModel(String),

    #[error("Failed to parse config file at {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Why a remote resource could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server answered with a non-success status code.
    Status(u16),
    /// The server answered successfully but sent no bytes.
    EmptyBody,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "HTTP status {code}"),
            FetchFailure::EmptyBody => f.write_str("empty response body"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
