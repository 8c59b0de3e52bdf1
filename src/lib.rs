//! Brigade library crate providing a minimal Bitbucket comment client.
//!
//! The library wraps an authenticated HTTP client bound to a single
//! repository's API root, expands RFC 6570 URI templates into concrete
//! endpoints, and exposes pull-request-scoped helpers to list, filter,
//! publish, and delete review comments. Bulk operations run concurrently
//! and settle every item before returning.

pub mod bitbucket;

pub use bitbucket::{
    Account, ApiClient, ApiError, Comment, Credentials, PullRequest, PullRequestId,
    RepositorySlug, Settled, TemplateVars,
};
