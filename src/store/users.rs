//! User directory.
//!
//! Resolves authenticated identities and email addresses to accounts.
//! Session issuance and passwords are out of scope; the workflow engine
//! only ever asks "who is this id" and "which account owns this address".

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{User, UserId};

#[derive(Clone, Default)]
pub struct UserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Resolve an email address to its account, if any.
    pub async fn by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[tokio::test]
    async fn resolves_by_id_and_email() {
        let directory = UserDirectory::new();
        let user = User::new("Bea", "b@x.com", Role::User);
        let id = user.id;
        directory.insert(user).await;

        assert_eq!(directory.get(id).await.unwrap().name, "Bea");
        assert_eq!(directory.by_email("b@x.com").await.unwrap().id, id);
        assert!(directory.by_email("nobody@x.com").await.is_none());
    }
}
