//! Authentication primitives such as credentials and password hashes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate raw inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{Username, user::UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username or password was missing, null, or blank.
    MissingFields,
    /// Username failed [`Username`] validation beyond emptiness.
    InvalidUsername(UserValidationError),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "username and password are required"),
            Self::InvalidUsername(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated credentials used by registration and login.
///
/// ## Invariants
/// - `username` satisfies [`Username`] (trimmed, non-empty).
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use roster::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(Some(" ada "), Some("secret")).unwrap();
/// assert_eq!(creds.username().as_str(), "ada");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from optional raw inputs.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let (Some(username), Some(password)) = (username, password) else {
            return Err(CredentialsValidationError::MissingFields);
        };
        if username.trim().is_empty() || password.is_empty() {
            return Err(CredentialsValidationError::MissingFields);
        }
        let username =
            Username::new(username).map_err(CredentialsValidationError::InvalidUsername)?;

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Salted password hash in PHC string format.
///
/// The hash is opaque to the domain; only a `PasswordHasher` adapter can
/// produce or verify one.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash loaded from storage or produced by a hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
