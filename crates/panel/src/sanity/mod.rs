//! Sanity Content Lake client.
//!
//! The store is an external collaborator reached over three HTTP
//! operations, all speaking GROQ:
//!
//! - query: `GET /v{version}/data/query/{dataset}?query=...`
//! - mutate: `POST /v{version}/data/mutate/{dataset}` (atomic per document)
//! - listen: `GET /v{version}/data/listen/{dataset}` (server-sent events)
//!
//! # Example
//!
//! ```rust,ignore
//! use peony_panel::sanity::SanityClient;
//!
//! let client = SanityClient::new(&config.sanity);
//!
//! // Recent orders under the active filter
//! let orders = client.recent_orders(&filters).await?;
//!
//! // Patch one status field
//! client.update_order("order-abc", &update).await?;
//! ```

mod client;
pub mod groq;
pub mod image;
mod orders;

pub use client::{
    CommitResult, CommitResultEntry, ListenEvent, MutationEvent, SanityClient, Transition,
};

use thiserror::Error;

/// Errors that can occur when talking to the Content Lake.
#[derive(Debug, Error)]
pub enum SanityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("Content Lake error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The token was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The listen stream broke mid-flight.
    #[error("Stream error: {0}")]
    Stream(String),
}
