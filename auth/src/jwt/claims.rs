use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

const EMAIL_CLAIM: &str = "email";
const USER_NAME_CLAIM: &str = "userName";

/// JWT claims structure.
///
/// Standard RFC 7519 time claims plus custom fields via the `extra` map.
/// Account tokens carry the subject email both as `sub` and as a flattened
/// `email` field, and optionally the display name as `userName`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (account email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims identifying an account by email.
    ///
    /// Time claims are left unset; they are stamped when the token is issued.
    pub fn for_account(email: impl ToString) -> Self {
        let email = email.to_string();
        Self::new()
            .with_extra(EMAIL_CLAIM, &email)
            .with_subject(email)
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Stamp `iat` and `exp` from the given instants.
    pub fn valid_between(self, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        self.with_issued_at(issued_at.timestamp())
            .with_expiration(expires_at.timestamp())
    }

    /// Set the display name claim.
    pub fn with_user_name(self, user_name: impl ToString) -> Self {
        self.with_extra(USER_NAME_CLAIM, user_name.to_string())
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Email the token was issued for.
    ///
    /// Reads the `email` field, falling back to `sub`.
    pub fn email(&self) -> Option<String> {
        self.extra_str(EMAIL_CLAIM).or_else(|| self.sub.clone())
    }

    /// Display name, present on tokens minted at registration.
    pub fn user_name(&self) -> Option<String> {
        self.extra_str(USER_NAME_CLAIM)
    }

    fn extra_str(&self, key: &str) -> Option<String> {
        self.extra
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}
