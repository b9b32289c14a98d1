use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::IssuedToken;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::Account;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
/// Password hashing and verification run on the blocking thread pool.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    async fn authenticate(
        &self,
        password: String,
        password_hash: String,
        claims: Claims,
    ) -> Result<IssuedToken, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, claims)
        })
        .await
        .map_err(|e| AccountError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(AccountError::from)
    }

    async fn find_existing(&self, email: &str) -> Result<Account, AccountError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountError::NotFound(email.to_string()))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, AccountError> {
        let password_hash = self.hash_password(command.password).await?;

        let account = Account {
            email: command.email,
            user_name: command.user_name,
            password_hash,
        };

        let created_account = self.repository.create(account).await?;

        let claims = Claims::for_account(created_account.email.as_str())
            .with_user_name(created_account.user_name.as_str());
        let token = self.authenticator.issue_token(claims)?;

        tracing::info!(email = %created_account.email, "Account registered");

        Ok(Session {
            account: created_account,
            token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AccountError> {
        let account = self.find_existing(&command.email).await?;

        let token = self
            .authenticate(
                command.password,
                account.password_hash.clone(),
                Claims::for_account(account.email.as_str()),
            )
            .await?;

        tracing::info!(email = %account.email, "Account logged in");

        Ok(Session { account, token })
    }

    async fn refresh_token(&self, email: &str) -> Result<Session, AccountError> {
        let account = self.find_existing(email).await?;

        let token = self
            .authenticator
            .issue_token(Claims::for_account(account.email.as_str()))?;

        tracing::info!(email = %account.email, "Token refreshed");

        Ok(Session { account, token })
    }

    async fn get_account(&self, email: &str) -> Result<Account, AccountError> {
        self.find_existing(email).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }
}
