use std::fmt;
use std::str::FromStr;

use auth::IssuedToken;

use crate::account::errors::EmailError;
use crate::account::errors::UserNameError;

/// Account aggregate entity.
///
/// Keyed by email; the email never changes once the account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: EmailAddress,
    pub user_name: UserName,
    pub password_hash: String,
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type. Any non-blank string is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(user_name: String) -> Result<Self, UserNameError> {
        if user_name.trim().is_empty() {
            Err(UserNameError::Blank)
        } else {
            Ok(Self(user_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub user_name: UserName,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `user_name` - Validated display name
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, user_name: UserName, password: String) -> Self {
        Self {
            email,
            user_name,
            password,
        }
    }
}

/// Command to log in with an email and plaintext password.
///
/// The email is only a lookup key here, so it is not format-checked.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Outcome of a flow that ends in a freshly issued token.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub token: IssuedToken,
}
