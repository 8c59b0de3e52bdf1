//! Error types exposed by the Bitbucket client.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced while constructing the client or talking to Bitbucket.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client could not be configured (malformed base URI or credentials).
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A URI template could not be expanded.
    #[error("URI template error: {message}")]
    Template {
        /// The variable or syntax problem encountered.
        message: String,
    },

    /// Networking failed while calling Bitbucket.
    #[error("network error talking to Bitbucket: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Bitbucket rejected the credentials.
    #[error("Bitbucket rejected the credentials: {message}")]
    Authentication {
        /// Error detail returned with the 401/403 response.
        message: String,
    },

    /// Bitbucket returned a non-authentication API error.
    #[error("Bitbucket API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Response body describing the failure.
        message: String,
    },

    /// A response body was not valid JSON where JSON was expected.
    #[error("response decoding failed: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },
}
