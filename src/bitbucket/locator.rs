//! Identity wrappers for repository coordinates and credentials.

use super::error::ApiError;

/// Bitbucket account (workspace) wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account(String);

impl Account {
    /// Validates that the account name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the supplied string is empty.
    pub fn new(value: &str) -> Result<Self, ApiError> {
        if value.is_empty() {
            return Err(ApiError::Configuration {
                message: "account name must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the account name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository slug wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug(String);

impl RepositorySlug {
    /// Validates that the repository slug is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the supplied string is empty.
    pub fn new(value: &str) -> Result<Self, ApiError> {
        if value.is_empty() {
            return Err(ApiError::Configuration {
                message: "repository slug must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository slug.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestId(u64);

impl PullRequestId {
    /// Validates that the identifier is positive.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the value is zero.
    pub fn new(value: u64) -> Result<Self, ApiError> {
        if value == 0 {
            return Err(ApiError::Configuration {
                message: "pull request id must be a positive integer".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Basic-auth credential pair sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Validates that the username is non-empty; the password may be any
    /// string (Bitbucket app passwords are opaque).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the username is blank.
    pub fn new(username: impl AsRef<str>, password: impl Into<String>) -> Result<Self, ApiError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApiError::Configuration {
                message: "username must not be blank".to_owned(),
            });
        }
        Ok(Self {
            username: trimmed.to_owned(),
            password: password.into(),
        })
    }

    /// Borrow the username.
    #[must_use]
    pub const fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Borrow the password.
    #[must_use]
    pub const fn password(&self) -> &str {
        self.password.as_str()
    }
}
