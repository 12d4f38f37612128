//! Error handling and custom error types
//!
//! Provides unified error handling across the generation and delivery
//! pipeline using thiserror. Upstream response bodies are always retained so
//! third-party API changes show up in diagnostics.

use crate::models::JobStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} API error (status {status}): {body}")]
    RemoteService {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
        body: String,
    },

    #[error("Generation job could not be created: {0}")]
    Submission(String),

    #[error("Generation {generation_id} ended with status {status}")]
    GenerationFailed {
        generation_id: String,
        status: JobStatus,
    },

    #[error("Failed to fetch asset {url}: {source}")]
    Delivery {
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),
}

impl Error {
    /// Upstream HTTP status, when the failure came from a non-2xx response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Error::RemoteService { status, .. } => Some(*status),
            Error::Delivery { source, .. } => source.upstream_status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
