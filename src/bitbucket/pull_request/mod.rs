//! Comment operations scoped to a single pull request.

use futures::future::join_all;
use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::locator::PullRequestId;
use super::models::{Comment, Settled};
use super::template::TemplateVars;

const COMMENTS_URI: &str = "pullrequests/{id}/comments";
const COMMENT_URI: &str = "pullrequests/{id}/comments/{comment_id}";

/// Per-pull-request facade over a shared [`ApiClient`].
///
/// The handle borrows the client and carries an immutable pull request id;
/// every operation expands the id into the endpoint template.
pub struct PullRequest<'client> {
    client: &'client ApiClient,
    id: PullRequestId,
}

impl<'client> PullRequest<'client> {
    /// Binds the handle to a shared client and pull request id.
    #[must_use]
    pub const fn new(client: &'client ApiClient, id: PullRequestId) -> Self {
        Self { client, id }
    }

    /// The pull request this handle is scoped to.
    #[must_use]
    pub const fn id(&self) -> PullRequestId {
        self.id
    }

    /// Fetches all comments on the pull request.
    ///
    /// Only the first page the service returns is fetched; the 1.0 comments
    /// endpoint is not paginated by this client.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the underlying GET, and returns
    /// `ApiError::Decode` when the response is not a JSON array.
    pub async fn all_comments(&self) -> Result<Vec<Comment>, ApiError> {
        let listing: Value = self.client.get_json(COMMENTS_URI, &self.id_vars()).await?;
        serde_json::from_value(listing).map_err(|error| ApiError::Decode {
            message: format!("comment listing was not a JSON array: {error}"),
        })
    }

    /// Fetches the comments authored by `username`.
    ///
    /// Matching is exact and case-sensitive on `author_info.username`;
    /// comments without an author never match. Relative order is preserved.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from [`Self::all_comments`].
    pub async fn user_comments(&self, username: &str) -> Result<Vec<Comment>, ApiError> {
        let comments = self.all_comments().await?;
        Ok(comments
            .into_iter()
            .filter(|comment| comment.author_username() == Some(username))
            .collect())
    }

    /// Deletes the given comments, all launched concurrently.
    ///
    /// Every deletion settles before the call returns; the result vector is
    /// positionally aligned with `ids`, and one comment failing does not
    /// abort the others. An empty `ids` issues no requests.
    pub async fn delete_comments(&self, ids: &[u64]) -> Settled<()> {
        let deletions = ids.iter().map(|&comment_id| async move {
            let vars = self.id_vars().set("comment_id", comment_id);
            self.client.delete(COMMENT_URI, &vars).await
        });
        join_all(deletions).await
    }

    /// Publishes the given comment payloads, all launched concurrently.
    ///
    /// Same settle contract as [`Self::delete_comments`]: positional results,
    /// no short-circuit on failure, no requests for an empty slice. Response
    /// bodies are not parsed.
    pub async fn publish_comments(&self, comments: &[Comment]) -> Settled<()> {
        let publications = comments.iter().map(|comment| async move {
            self.client
                .post_json(COMMENTS_URI, comment, &self.id_vars())
                .await
                .map(|_response| ())
        });
        join_all(publications).await
    }

    fn id_vars(&self) -> TemplateVars {
        TemplateVars::new().set("id", self.id.get())
    }
}
