//! Transport-level error types
//!
//! Errors raised while talking to the remote GraphQL API (network, HTTP status,
//! GraphQL envelope, response decoding).

use thiserror::Error;

/// Errors that can occur on a single remote call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be sent or the connection failed (includes timeouts)
    #[error("Failed to send request to remote API: {0}")]
    Request(String),

    /// The remote API answered with a non-success HTTP status
    #[error("Remote API returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The GraphQL envelope carried top-level errors
    #[error("GraphQL request failed: {0}")]
    Graphql(String),

    /// The response body did not have the expected shape
    #[error("Malformed response from remote API: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}
