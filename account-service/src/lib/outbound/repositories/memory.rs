use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store keyed by email.
///
/// Used when no database is configured and by the test suite. Contents are
/// lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<BTreeMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        match self
            .accounts
            .write()
            .await
            .entry(account.email.as_str().to_string())
        {
            Entry::Occupied(_) => Err(AccountError::AlreadyExists(account.email.to_string())),
            Entry::Vacant(slot) => Ok(slot.insert(account).clone()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.accounts.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::UserName;

    fn account(email: &str) -> Account {
        Account {
            email: EmailAddress::new(email.to_string()).unwrap(),
            user_name: UserName::new("A".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryAccountRepository::new();

        repository.create(account("a@x.com")).await.unwrap();

        let found = repository.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found, Some(account("a@x.com")));
        assert_eq!(repository.find_by_email("b@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_duplicate_keeps_original() {
        let repository = InMemoryAccountRepository::new();
        repository.create(account("a@x.com")).await.unwrap();

        let mut duplicate = account("a@x.com");
        duplicate.password_hash = "$argon2id$other_hash".to_string();

        let result = repository.create(duplicate).await;
        assert!(matches!(result, Err(AccountError::AlreadyExists(_))));

        let stored = repository.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "$argon2id$test_hash");
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_email() {
        let repository = InMemoryAccountRepository::new();
        repository.create(account("c@x.com")).await.unwrap();
        repository.create(account("a@x.com")).await.unwrap();
        repository.create(account("b@x.com")).await.unwrap();

        let emails: Vec<String> = repository
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.email.to_string())
            .collect();

        assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
    }
}
