//! Administrative user management

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<User> {
        self.repository.users_list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    /// Update any field of a user account, role included
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        data.validate()?;

        let user = self
            .repository
            .users_update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        tracing::info!("User {} updated (role {})", user.id, user.role);
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.users_delete(id).await? {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        tracing::info!("User {} deleted", id);
        Ok(())
    }
}
