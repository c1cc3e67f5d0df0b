//! Session domain methods on Repository

use super::Repository;
use crate::{error::AppResult, models::User, storage::DocumentStore};

impl Repository {
    /// The stored session actor, if any
    pub async fn session_current(&self) -> Option<User> {
        self.session.snapshot().await
    }

    /// Replace the session actor (`None` signs out)
    pub async fn session_set(&self, actor: Option<User>) -> AppResult<()> {
        let mut session = self.session.lock().await;
        self.store
            .write_sections(vec![self.session.encode(&actor)?])
            .await?;
        *session = actor;
        Ok(())
    }
}
