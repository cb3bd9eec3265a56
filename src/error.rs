//! Error types for the report run.
//!
//! The run only ever needs to tell authentication failures apart from every
//! other API failure; [`ApiError::is_auth`] is that distinction.

use std::io;
use thiserror::Error;

/// Failure of a single Dashboard API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401: the API key was rejected.
    #[error("invalid API key (HTTP 401) for {path}")]
    Unauthorized { path: String },

    /// HTTP 404, e.g. a network without a security appliance.
    #[error("not found (HTTP 404): {path}")]
    NotFound { path: String },

    /// Any other non-success status.
    #[error("HTTP {status} from {path}: {message}")]
    Status {
        status: u16,
        path: String,
        message: String,
    },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON shape we expected; `at` is the JSON path.
    #[error("could not decode response from {path} at `{at}`: {source}")]
    Decode {
        path: String,
        at: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Failure while obtaining a working API key.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API error: {0}")]
    Api(#[source] ApiError),

    #[error("console error: {0}")]
    Console(#[from] io::Error),
}

/// Top level error of a report run; anything here ends the process non-zero.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("No organizations found.")]
    NoOrganizations,

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
