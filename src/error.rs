// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Anything here ends the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("missing configuration: {0}")]
    Config(String),

    #[error("invalid credentials: {0}")]
    Credentials(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read rows: {0}")]
    Tsv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to sign token request: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("row {line} (swim #{swim}): {source}")]
    InvalidRow {
        line: usize,
        swim: String,
        #[source]
        source: RowError,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn http(url: &str, err: ureq::Error) -> Self {
        let message = match err {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                format!("HTTP {code}: {}", body.trim())
            }
            ureq::Error::Transport(t) => t.to_string(),
        };
        Error::Http { url: s!(url), message }
    }
}

/// Why a single row could not become a feature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing column `{0}`")]
    MissingField(&'static str),

    #[error("coordinates `{0}` are not a `lat,lon` pair")]
    BadCoordinates(String),

    #[error("`{field}` value `{value}` is not a valid number")]
    BadNumber { field: &'static str, value: String },
}
