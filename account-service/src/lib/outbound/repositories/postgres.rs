use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UserName;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    email: String,
    user_name: String,
    password_hash: String,
}

// A stored row that no longer validates is a store fault, not a client error.
impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email.clone()).map_err(|e| {
            AccountError::DatabaseError(format!("Corrupt account row {}: {}", row.email, e))
        })?;
        let user_name = UserName::new(row.user_name).map_err(|e| {
            AccountError::DatabaseError(format!("Corrupt account row {}: {}", row.email, e))
        })?;

        Ok(Account {
            email,
            user_name,
            password_hash: row.password_hash,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (email, user_name, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.user_name.as_str())
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::AlreadyExists(account.email.to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT email, user_name, password_hash
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT email, user_name, password_hash
            FROM accounts
            ORDER BY email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
