//! User domain methods on Repository

use chrono::Utc;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{RegisterUser, Role, UpdateUser, User},
    storage::DocumentStore,
};

impl Repository {
    /// List all users
    pub async fn users_list(&self) -> Vec<User> {
        self.users.snapshot().await
    }

    /// Get user by ID
    pub async fn users_get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .lock()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Find a user by email, ignoring case
    pub async fn users_find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .await
            .iter()
            .find(|user| user.matches_email(email))
            .cloned()
    }

    /// Count users with `role`
    pub async fn users_count_by_role(&self, role: Role) -> usize {
        self.users
            .lock()
            .await
            .iter()
            .filter(|user| user.role == role)
            .count()
    }

    /// Create a customer account and make it the session actor, in one write
    pub async fn users_register(&self, data: &RegisterUser) -> AppResult<User> {
        let mut users = self.users.lock().await;
        let mut session = self.session.lock().await;

        let email = data.email.trim().to_lowercase();
        if users.iter().any(|user| user.matches_email(&email)) {
            return Err(AppError::DuplicateEmail(email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            email,
            password: data.password.clone(),
            role: Role::Customer,
            phone: data.phone.clone(),
            address: data.address.clone(),
            created_at: Utc::now(),
        };

        let mut next = users.clone();
        next.push(user.clone());
        let next_session = Some(user.clone());

        self.store
            .write_sections(vec![
                self.users.encode(&next)?,
                self.session.encode(&next_session)?,
            ])
            .await?;

        *users = next;
        *session = next_session;

        Ok(user)
    }

    /// Update a user record. Refreshes the session snapshot when the
    /// updated user is the current actor. Returns `None` when the id is unknown.
    pub async fn users_update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        let mut users = self.users.lock().await;
        let mut session = self.session.lock().await;

        if let Some(ref email) = data.email {
            if users
                .iter()
                .any(|user| user.id != id && user.matches_email(email))
            {
                return Err(AppError::DuplicateEmail(email.trim().to_lowercase()));
            }
        }

        let mut next = users.clone();
        let Some(user) = next.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(ref name) = data.name {
            user.name = name.trim().to_string();
        }
        if let Some(ref email) = data.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(ref password) = data.password {
            user.password = password.clone();
        }
        if let Some(role) = data.role {
            user.role = role;
        }
        if let Some(ref phone) = data.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(ref address) = data.address {
            user.address = Some(address.clone());
        }
        let updated = user.clone();

        let mut sections = vec![self.users.encode(&next)?];
        let next_session = match session.as_ref() {
            Some(actor) if actor.id == id => Some(updated.clone()),
            _ => session.clone(),
        };
        if next_session != *session {
            sections.push(self.session.encode(&next_session)?);
        }
        self.store.write_sections(sections).await?;

        *users = next;
        *session = next_session;

        Ok(Some(updated))
    }

    /// Delete a user. Clears the session if it belonged to that user.
    /// Returns whether a record was found.
    pub async fn users_delete(&self, id: Uuid) -> AppResult<bool> {
        let mut users = self.users.lock().await;
        let mut session = self.session.lock().await;

        if !users.iter().any(|user| user.id == id) {
            return Ok(false);
        }
        let next: Vec<User> = users.iter().filter(|user| user.id != id).cloned().collect();

        let mut sections = vec![self.users.encode(&next)?];
        let signs_out = session.as_ref().is_some_and(|actor| actor.id == id);
        if signs_out {
            sections.push(self.session.encode(&None)?);
        }
        self.store.write_sections(sections).await?;

        *users = next;
        if signs_out {
            *session = None;
        }

        Ok(true)
    }
}
