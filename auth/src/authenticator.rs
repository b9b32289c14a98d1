use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing secret and token lifetime fixed at construction; there
/// is no process-wide key material.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    /// JWT access token
    pub access_token: String,
    /// Instant after which the token stops verifying
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default password hasher.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Validity window of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(PasswordHasher::new(), jwt_secret, token_ttl)
    }

    /// Create an authenticator with an explicitly tuned password hasher.
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        jwt_secret: &[u8],
        token_ttl: Duration,
    ) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// Blocks on the password hash; async callers should run it off the runtime.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: Claims,
    ) -> Result<IssuedToken, AuthenticationError> {
        self.verify_password(password, stored_hash)?;

        Ok(self.issue_token(claims)?)
    }

    /// Issue a token without password verification.
    ///
    /// Stamps `iat` with the current time and `exp` with `iat + ttl`, then signs.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed, or `iat + ttl` is out of range
    pub fn issue_token(&self, claims: Claims) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.token_ttl).ok_or_else(|| {
            JwtError::EncodingFailed("token lifetime exceeds the representable range".to_string())
        })?;
        let claims = claims.valid_between(now, expires_at);

        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    /// Validate and decode a token.
    ///
    /// Returns the embedded claims unchanged.
    ///
    /// # Errors
    /// * `JwtError` - Signature mismatch, malformed token or expired token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
