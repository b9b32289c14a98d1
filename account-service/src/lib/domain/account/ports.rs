use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// The token carries the email and the display name.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, user name, and password
    ///
    /// # Returns
    /// Created account and its token
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Session, AccountError>;

    /// Check credentials and issue a token carrying the email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError>;

    /// Issue a new token for an existing account.
    ///
    /// Neither a password nor a previous token is required.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `DatabaseError` - Store operation failed
    async fn refresh_token(&self, email: &str) -> Result<Session, AccountError>;

    /// Retrieve account by email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, email: &str) -> Result<Account, AccountError>;

    /// Retrieve every account, ordered by email.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Arguments
    /// * `account` - Account entity to create
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts from storage, ordered by email.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
}
