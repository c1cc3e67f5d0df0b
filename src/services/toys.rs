//! Toy catalogue service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CreateToy, NewToy, Toy, ToyQuery, UpdateToy, User},
    policy,
    repository::Repository,
};

#[derive(Clone)]
pub struct ToysService {
    repository: Repository,
}

impl ToysService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<Toy> {
        self.repository.toys_list().await
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Vec<Toy> {
        self.repository.toys_list_by_owner(owner_id).await
    }

    /// Toys the actor could borrow right now
    pub async fn browse(&self, actor: Option<&User>, query: &ToyQuery) -> Vec<Toy> {
        self.repository
            .toys_search(actor.map(|actor| actor.id), query)
            .await
    }

    pub async fn categories(&self) -> Vec<String> {
        self.repository.toys_categories().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Toy> {
        self.repository.toys_get_by_id(id).await
    }

    /// List a new toy owned by `owner`
    pub async fn create(&self, owner: &User, fields: CreateToy) -> AppResult<Toy> {
        let toy = self
            .repository
            .toys_create(NewToy {
                fields,
                owner_id: owner.id,
                owner_name: owner.name.clone(),
            })
            .await?;
        tracing::info!("Toy {} '{}' listed by user {}", toy.id, toy.name, owner.id);
        Ok(toy)
    }

    pub async fn update(&self, actor: &User, id: Uuid, data: &UpdateToy) -> AppResult<Toy> {
        let toy = self.repository.toys_get_by_id(id).await?;
        policy::require_edit_toy(actor, &toy)?;

        let updated = self
            .repository
            .toys_update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Toy {} not found", id)))?;
        tracing::info!("Toy {} updated by user {}", id, actor.id);
        Ok(updated)
    }

    /// Remove a toy; refused while a pending or active borrow references it
    pub async fn delete(&self, actor: &User, id: Uuid) -> AppResult<()> {
        let toy = self.repository.toys_get_by_id(id).await?;
        policy::require_edit_toy(actor, &toy)?;

        if !self.repository.toys_delete_unless_borrowed(id).await? {
            return Err(AppError::NotFound(format!("Toy {} not found", id)));
        }
        tracing::info!("Toy {} deleted by user {}", id, actor.id);
        Ok(())
    }
}
