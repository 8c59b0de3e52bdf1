//! Authenticated JSON verbs against the repository-scoped API root.

use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::error::ApiError;
use super::locator::{Account, Credentials, RepositorySlug};
use super::template::{self, TemplateVars};

/// Bitbucket 1.0 API root for the hosted service.
const DEFAULT_API_ROOT: &str = "https://api.bitbucket.org/1.0";

/// Client bound to one repository, applying basic auth to every request.
///
/// The base URL is expanded once at construction and never mutated. The
/// wrapped `reqwest::Client` is safe for concurrent use, so one `ApiClient`
/// can serve any number of overlapping operations.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ApiClient {
    /// Creates a client against the hosted Bitbucket API.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the expanded base URI is not a
    /// valid URL or the HTTP client cannot be built.
    pub fn new(
        credentials: Credentials,
        account: &Account,
        repository: &RepositorySlug,
    ) -> Result<Self, ApiError> {
        Self::with_api_root(DEFAULT_API_ROOT, credentials, account, repository)
    }

    /// Creates a client against a caller-supplied API root (e.g. a self-hosted
    /// instance or a test server).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the expanded base URI is not a
    /// valid URL or the HTTP client cannot be built.
    pub fn with_api_root(
        api_root: &str,
        credentials: Credentials,
        account: &Account,
        repository: &RepositorySlug,
    ) -> Result<Self, ApiError> {
        let base_template = format!(
            "{root}/repositories/{{account}}/{{repository}}/",
            root = api_root.trim_end_matches('/')
        );
        let vars = TemplateVars::new()
            .set("account", account.as_str())
            .set("repository", repository.as_str());
        let expanded = template::expand(&base_template, &vars)?;

        let base_url = Url::parse(&expanded).map_err(|error| ApiError::Configuration {
            message: format!("base URI '{expanded}' is invalid: {error}"),
        })?;

        let http = Client::builder()
            .build()
            .map_err(|error| ApiError::Configuration {
                message: format!("failed to build HTTP client: {error}"),
            })?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Expands a URI template and issues a GET, decoding the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Template` on expansion failure, `Network` on
    /// transport failure, `Authentication`/`Api` on non-2xx status, and
    /// `Decode` when the body is not valid JSON.
    pub async fn get_json(&self, uri: &str, vars: &TemplateVars) -> Result<Value, ApiError> {
        let url = self.endpoint(uri, vars)?;
        tracing::debug!("GET {url}");
        let response = send(self.authorised(self.http.get(url.clone()))).await?;
        let checked = check_status("GET", response).await?;
        let body = checked.text().await.map_err(|error| ApiError::Network {
            message: format!("GET {url} failed reading body: {error}"),
        })?;
        serde_json::from_str(&body).map_err(|error| ApiError::Decode {
            message: format!("GET {url} returned invalid JSON: {error}"),
        })
    }

    /// Expands a URI template and issues a POST with `data` as the JSON body.
    ///
    /// The response body is returned unparsed; callers that want the created
    /// resource can decode it themselves.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Template` on expansion failure, `Network` on
    /// transport failure, and `Authentication`/`Api` on non-2xx status.
    pub async fn post_json<B>(
        &self,
        uri: &str,
        data: &B,
        vars: &TemplateVars,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(uri, vars)?;
        tracing::debug!("POST {url}");
        let response = send(self.authorised(self.http.post(url)).json(data)).await?;
        check_status("POST", response).await
    }

    /// Expands a URI template and issues a DELETE.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Template` on expansion failure, `Network` on
    /// transport failure, and `Authentication`/`Api` on non-2xx status.
    pub async fn delete(&self, uri: &str, vars: &TemplateVars) -> Result<(), ApiError> {
        let url = self.endpoint(uri, vars)?;
        tracing::debug!("DELETE {url}");
        let response = send(self.authorised(self.http.delete(url))).await?;
        check_status("DELETE", response).await.map(|_response| ())
    }

    /// Underlying HTTP transport, for dependents that need direct access.
    #[must_use]
    pub const fn http(&self) -> &Client {
        &self.http
    }

    /// The repository-scoped base URL, fixed at construction.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, uri: &str, vars: &TemplateVars) -> Result<Url, ApiError> {
        let expanded = template::expand(uri, vars)?;
        self.base_url
            .join(&expanded)
            .map_err(|error| ApiError::Template {
                message: format!("expanded path '{expanded}' is not a valid URL: {error}"),
            })
    }

    fn authorised(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(
            self.credentials.username(),
            Some(self.credentials.password()),
        )
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    builder.send().await.map_err(|error| ApiError::Network {
        message: format!("request transport failed: {error}"),
    })
}

/// Checks if an HTTP status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

async fn check_status(operation: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| truncate_for_message(body.trim(), 160));

    if is_auth_failure(status) {
        return Err(ApiError::Authentication {
            message: format!("{operation} failed: Bitbucket returned {status} {message}"),
        });
    }

    Err(ApiError::Api {
        status,
        message: format!("{operation} failed: {message}"),
    })
}

/// Pulls a human-readable message out of a JSON error body, when there is one.
fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value
        .get("error")
        .and_then(|error| error.get("message"))
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
