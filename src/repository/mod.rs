//! Repository layer over the document store.
//!
//! The repository owns one in-memory copy of every collection, loaded once at
//! construction and refreshed only by an explicit [`Repository::reload`].
//! Each collection has its own async mutex; a mutation holds the lock while it
//! modifies a copy, writes the copy to the store, and only then replaces the
//! in-memory collection. A failed write leaves memory untouched.
//!
//! Locks are always taken in the order users, toys, borrows, session.

pub mod borrows;
pub mod seed;
pub mod session;
pub mod toys;
pub mod users;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    error::AppResult,
    models::{BorrowRecord, Toy, User},
    storage::{Document, DocumentStore, Section},
};

/// One named section held in memory
#[derive(Clone)]
pub(crate) struct Collection<T> {
    section: Section,
    data: Arc<Mutex<T>>,
}

impl<T: Clone + Serialize> Collection<T> {
    fn new(section: Section, data: T) -> Self {
        Self {
            section,
            data: Arc::new(Mutex::new(data)),
        }
    }

    async fn lock(&self) -> MutexGuard<'_, T> {
        self.data.lock().await
    }

    async fn snapshot(&self) -> T {
        self.data.lock().await.clone()
    }

    fn encode(&self, data: &T) -> AppResult<(Section, Value)> {
        Ok((self.section, serde_json::to_value(data)?))
    }
}

/// Main repository struct holding the store and the loaded collections
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
    users: Collection<Vec<User>>,
    toys: Collection<Vec<Toy>>,
    borrows: Collection<Vec<BorrowRecord>>,
    session: Collection<Option<User>>,
}

impl Repository {
    /// Load every collection from `store`
    pub async fn open(store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        let document = store.read_all().await?;
        tracing::info!(
            "Loaded {} users, {} toys, {} borrow records",
            document.users.len(),
            document.toys.len(),
            document.borrows.len()
        );

        Ok(Self {
            users: Collection::new(Section::Users, document.users),
            toys: Collection::new(Section::Toys, document.toys),
            borrows: Collection::new(Section::Borrows, document.borrows),
            session: Collection::new(Section::Session, document.session),
            store,
        })
    }

    /// Replace every in-memory collection with what the store currently holds
    pub async fn reload(&self) -> AppResult<()> {
        let document = self.store.read_all().await?;

        let mut users = self.users.lock().await;
        let mut toys = self.toys.lock().await;
        let mut borrows = self.borrows.lock().await;
        let mut session = self.session.lock().await;

        *users = document.users;
        *toys = document.toys;
        *borrows = document.borrows;
        *session = document.session;

        tracing::debug!("Repository reloaded from store");
        Ok(())
    }

    /// Read the store once without touching memory
    pub async fn check_store(&self) -> AppResult<()> {
        self.store.read_all().await.map(|_| ())
    }

    /// Snapshot of the whole in-memory document
    pub async fn document(&self) -> Document {
        let users = self.users.lock().await;
        let toys = self.toys.lock().await;
        let borrows = self.borrows.lock().await;
        let session = self.session.lock().await;

        Document {
            users: users.clone(),
            toys: toys.clone(),
            borrows: borrows.clone(),
            session: session.clone(),
        }
    }

    /// Replace one section wholesale with raw JSON
    pub async fn replace_section(&self, section: Section, data: Value) -> AppResult<()> {
        let mut staged = Document::default();
        staged.set_section(section, data)?;

        match section {
            Section::Users => {
                let mut users = self.users.lock().await;
                self.store.write_sections(vec![self.users.encode(&staged.users)?]).await?;
                *users = staged.users;
            }
            Section::Toys => {
                let mut toys = self.toys.lock().await;
                self.store.write_sections(vec![self.toys.encode(&staged.toys)?]).await?;
                *toys = staged.toys;
            }
            Section::Borrows => {
                let mut borrows = self.borrows.lock().await;
                self.store.write_sections(vec![self.borrows.encode(&staged.borrows)?]).await?;
                *borrows = staged.borrows;
            }
            Section::Session => {
                let mut session = self.session.lock().await;
                self.store.write_sections(vec![self.session.encode(&staged.session)?]).await?;
                *session = staged.session;
            }
        }

        tracing::info!("Replaced section {}", section);
        Ok(())
    }

    /// Replace the entire document
    pub async fn replace_document(&self, document: Document) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let mut toys = self.toys.lock().await;
        let mut borrows = self.borrows.lock().await;
        let mut session = self.session.lock().await;

        self.store.write_all(&document).await?;

        *users = document.users;
        *toys = document.toys;
        *borrows = document.borrows;
        *session = document.session;

        tracing::info!("Replaced whole document");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{Role, ToyCondition};
    use crate::storage::MemoryStore;

    pub fn user(name: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "secret1".to_string(),
            role,
            phone: None,
            address: None,
            created_at: Utc::now(),
        }
    }

    pub fn toy(name: &str, owner: &User) -> Toy {
        Toy {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{} for sharing", name),
            category: "Building".to_string(),
            age_range: "6-12".to_string(),
            condition: ToyCondition::Good,
            image_url: "https://example.com/toy.png".to_string(),
            owner_id: owner.id,
            owner_name: owner.name.clone(),
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub async fn repository_with(document: Document) -> (Repository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_document(&document).unwrap());
        let repository = Repository::open(store.clone()).await.unwrap();
        (repository, store)
    }
}
