//! In-process user store. All operations are serialised behind one lock, so
//! concurrent writers observe the same email uniqueness rule as PostgreSQL.

use super::{StoreError, UserStore};
use crate::model::{NewUser, User, UserChanges};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    users: BTreeMap<u64, User>,
    last_id: u64,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email(email: &str) -> StoreError {
    StoreError::Conflict(format!("email '{}' already exists", email))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.email_taken(&user.email, None) {
            return Err(duplicate_email(&user.email));
        }
        inner.last_id += 1;
        let user = User {
            id: inner.last_id,
            name: user.name,
            email: user.email,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: u64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().await.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().await.users.values().cloned().collect())
    }

    async fn update(&self, id: u64, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email {
            if inner.email_taken(email, Some(id)) {
                return Err(duplicate_email(email));
            }
        }
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().await.users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially_and_never_reused() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("Ana", "ana@x.com")).await.unwrap();
        let b = store.create(new_user("Bea", "bea@x.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete(b.id).await.unwrap());
        let c = store.create(new_user("Cai", "cai@x.com")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryUserStore::new();
        store.create(new_user("Ana", "ana@x.com")).await.unwrap();
        let err = store.create(new_user("Other", "ana@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_email_admit_exactly_one() {
        let store = Arc::new(MemoryUserStore::new());
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.create(new_user(&format!("u{i}"), "same@x.com")).await
            }));
        }
        let mut ok = 0;
        for t in tasks {
            if t.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let store = MemoryUserStore::new();
        let u = store.create(new_user("Ana", "ana@x.com")).await.unwrap();
        let changes = UserChanges {
            name: Some("Ana Maria".into()),
            email: None,
        };
        let updated = store.update(u.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, "ana@x.com");
    }

    #[tokio::test]
    async fn update_to_own_email_is_not_a_conflict() {
        let store = MemoryUserStore::new();
        let u = store.create(new_user("Ana", "ana@x.com")).await.unwrap();
        let changes = UserChanges {
            name: None,
            email: Some("ana@x.com".into()),
        };
        assert!(store.update(u.id, changes).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id() {
        let store = MemoryUserStore::new();
        assert_eq!(store.update(9, UserChanges::default()).await.unwrap(), None);
        assert!(!store.delete(9).await.unwrap());
    }
}
