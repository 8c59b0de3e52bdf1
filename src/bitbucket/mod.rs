//! Bitbucket 1.0 pull-request comment API client.
//!
//! This module wraps `reqwest` to authenticate against the Bitbucket REST
//! API, expand URI templates into repository-scoped endpoints, and surface
//! comment operations on a single pull request. Errors are mapped into
//! caller-friendly variants so that failures can be reported without
//! exposing transport internals.

pub mod client;
pub mod error;
pub mod locator;
pub mod models;
pub mod pull_request;
pub mod template;

pub use client::ApiClient;
pub use error::ApiError;
pub use locator::{Account, Credentials, PullRequestId, RepositorySlug};
pub use models::{Comment, Settled};
pub use pull_request::PullRequest;
pub use template::TemplateVars;
