//! Toy domain methods on Repository

use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{NewToy, Toy, ToyQuery, UpdateToy},
    storage::DocumentStore,
};

impl Repository {
    /// List all toys
    pub async fn toys_list(&self) -> Vec<Toy> {
        self.toys.snapshot().await
    }

    /// List toys owned by `owner_id`
    pub async fn toys_list_by_owner(&self, owner_id: Uuid) -> Vec<Toy> {
        self.toys
            .lock()
            .await
            .iter()
            .filter(|toy| toy.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Available toys not owned by `actor_id`; every available toy when there is no actor
    pub async fn toys_list_available_excluding(&self, actor_id: Option<Uuid>) -> Vec<Toy> {
        self.toys_search(actor_id, &ToyQuery::default()).await
    }

    /// Available toys not owned by `actor_id`, filtered by `query`
    pub async fn toys_search(&self, actor_id: Option<Uuid>, query: &ToyQuery) -> Vec<Toy> {
        self.toys
            .lock()
            .await
            .iter()
            .filter(|toy| toy.available)
            .filter(|toy| actor_id.map_or(true, |actor| toy.owner_id != actor))
            .filter(|toy| query.matches(toy))
            .cloned()
            .collect()
    }

    /// Distinct categories across all toys, sorted
    pub async fn toys_categories(&self) -> Vec<String> {
        self.toys
            .lock()
            .await
            .iter()
            .map(|toy| toy.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Get toy by ID
    pub async fn toys_get_by_id(&self, id: Uuid) -> AppResult<Toy> {
        self.toys
            .lock()
            .await
            .iter()
            .find(|toy| toy.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Toy {} not found", id)))
    }

    /// Create a toy; new toys start out available
    pub async fn toys_create(&self, new_toy: NewToy) -> AppResult<Toy> {
        new_toy.fields.validate()?;

        let now = Utc::now();
        let fields = new_toy.fields;
        let toy = Toy {
            id: Uuid::new_v4(),
            name: fields.name.trim().to_string(),
            description: fields.description,
            category: fields.category.trim().to_string(),
            age_range: fields.age_range.trim().to_string(),
            condition: fields.condition,
            image_url: fields.image_url,
            owner_id: new_toy.owner_id,
            owner_name: new_toy.owner_name,
            available: true,
            created_at: now,
            updated_at: now,
        };

        let mut toys = self.toys.lock().await;
        let mut next = toys.clone();
        next.push(toy.clone());
        self.store.write_sections(vec![self.toys.encode(&next)?]).await?;
        *toys = next;

        Ok(toy)
    }

    /// Merge `data` over an existing toy. Returns `None` when the id is unknown.
    pub async fn toys_update(&self, id: Uuid, data: &UpdateToy) -> AppResult<Option<Toy>> {
        data.validate()?;

        let mut toys = self.toys.lock().await;
        let mut next = toys.clone();
        let Some(toy) = next.iter_mut().find(|toy| toy.id == id) else {
            return Ok(None);
        };
        data.apply(toy);
        toy.updated_at = Utc::now();
        let updated = toy.clone();

        self.store.write_sections(vec![self.toys.encode(&next)?]).await?;
        *toys = next;

        Ok(Some(updated))
    }

    /// Delete a toy. Returns whether a record was found.
    pub async fn toys_delete(&self, id: Uuid) -> AppResult<bool> {
        let mut toys = self.toys.lock().await;
        if !toys.iter().any(|toy| toy.id == id) {
            return Ok(false);
        }
        let next: Vec<Toy> = toys.iter().filter(|toy| toy.id != id).cloned().collect();

        self.store.write_sections(vec![self.toys.encode(&next)?]).await?;
        *toys = next;

        Ok(true)
    }

    /// Delete a toy unless an open borrow still references it
    pub async fn toys_delete_unless_borrowed(&self, id: Uuid) -> AppResult<bool> {
        let mut toys = self.toys.lock().await;
        let borrows = self.borrows.lock().await;

        if !toys.iter().any(|toy| toy.id == id) {
            return Ok(false);
        }
        if let Some(open) = borrows.iter().find(|b| b.toy_id == id && b.status.is_open()) {
            return Err(AppError::Conflict(format!(
                "Toy {} has an open borrow ({}, {})",
                id, open.id, open.status
            )));
        }
        let next: Vec<Toy> = toys.iter().filter(|toy| toy.id != id).cloned().collect();

        self.store.write_sections(vec![self.toys.encode(&next)?]).await?;
        *toys = next;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::{
        error::AppError,
        models::{CreateToy, NewToy, Role, ToyCondition, ToyQuery, UpdateToy},
        storage::{Document, DocumentStore},
    };

    fn create_fields(name: &str) -> CreateToy {
        CreateToy {
            name: name.to_string(),
            description: "Colourful and complete".to_string(),
            category: "Puzzles".to_string(),
            age_range: "3-6".to_string(),
            condition: ToyCondition::LikeNew,
            image_url: "https://example.com/puzzle.png".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_identity_and_persists() {
        let owner = user("Binh", Role::Customer);
        let (repository, store) = repository_with(Document::default()).await;

        let toy = repository
            .toys_create(NewToy {
                fields: create_fields("  Jigsaw  "),
                owner_id: owner.id,
                owner_name: owner.name.clone(),
            })
            .await
            .unwrap();

        assert_eq!(toy.name, "Jigsaw");
        assert!(toy.available);
        assert_eq!(toy.created_at, toy.updated_at);
        assert_eq!(toy.owner_name, "Binh");
        assert_eq!(store.read_all().await.unwrap().toys, vec![toy]);
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let owner = user("Binh", Role::Customer);
        let (repository, store) = repository_with(Document::default()).await;

        let mut fields = create_fields("Jigsaw");
        fields.image_url = "puzzle.png".to_string();
        let result = repository
            .toys_create(NewToy {
                fields,
                owner_id: owner.id,
                owner_name: owner.name.clone(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.read_all().await.unwrap().toys.is_empty());
    }

    #[tokio::test]
    async fn update_merges_and_reports_unknown_ids() {
        let owner = user("Chi", Role::Customer);
        let original = toy("Yo-yo", &owner);
        let (repository, _store) = repository_with(Document {
            toys: vec![original.clone()],
            ..Document::default()
        })
        .await;

        let update = UpdateToy {
            name: Some("Glow yo-yo".to_string()),
            condition: Some(ToyCondition::Fair),
            ..UpdateToy::default()
        };
        let updated = repository
            .toys_update(original.id, &update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Glow yo-yo");
        assert_eq!(updated.condition, ToyCondition::Fair);
        assert_eq!(updated.description, original.description);
        assert!(updated.updated_at >= original.updated_at);

        let missing = repository
            .toys_update(uuid::Uuid::new_v4(), &update)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn listing_filters() {
        let an = user("An", Role::Customer);
        let binh = user("Binh", Role::Customer);
        let mut lent_out = toy("Drone", &binh);
        lent_out.available = false;
        let kite = toy("Kite", &an);
        let blocks = toy("Blocks", &binh);

        let (repository, _store) = repository_with(Document {
            toys: vec![kite.clone(), blocks.clone(), lent_out.clone()],
            ..Document::default()
        })
        .await;

        assert_eq!(repository.toys_list().await.len(), 3);
        assert_eq!(repository.toys_list_by_owner(binh.id).await.len(), 2);

        let for_an = repository.toys_list_available_excluding(Some(an.id)).await;
        assert_eq!(for_an, vec![blocks.clone()]);

        let anonymous = repository.toys_list_available_excluding(None).await;
        assert_eq!(anonymous, vec![kite, blocks]);

        let query = ToyQuery {
            q: Some("kit".to_string()),
            category: None,
        };
        assert_eq!(repository.toys_search(Some(binh.id), &query).await.len(), 1);
        assert_eq!(repository.toys_categories().await, vec!["Building".to_string()]);
    }

    #[tokio::test]
    async fn delete_reports_whether_found() {
        let owner = user("Dung", Role::Customer);
        let kite = toy("Kite", &owner);
        let (repository, store) = repository_with(Document {
            toys: vec![kite.clone()],
            ..Document::default()
        })
        .await;

        assert!(repository.toys_delete(kite.id).await.unwrap());
        assert!(!repository.toys_delete(kite.id).await.unwrap());
        assert!(store.read_all().await.unwrap().toys.is_empty());
    }
}
