//! Process-wide session: login, registration and logout

use validator::Validate;

use crate::{
    error::AppResult,
    models::{is_valid_email, RegisterUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct SessionStore {
    repository: Repository,
}

impl SessionStore {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Authenticate with email and password.
    ///
    /// Returns `None` for malformed input or wrong credentials; the session
    /// is left as it was in that case.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) || password.is_empty() {
            tracing::warn!("Login rejected: malformed credentials");
            return Ok(None);
        }

        let Some(user) = self
            .repository
            .users_find_by_email(&email)
            .await
            .filter(|user| user.password == password)
        else {
            tracing::warn!("Login failed for {}", email);
            return Ok(None);
        };

        self.repository.session_set(Some(user.clone())).await?;
        tracing::info!("User {} ({}) logged in", user.id, user.role);
        Ok(Some(user))
    }

    /// Create a customer account and sign it in
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        let data = RegisterUser {
            name: data.name.trim().to_string(),
            email: data.email.trim().to_lowercase(),
            ..data
        };
        data.validate()?;

        let user = self.repository.users_register(&data).await?;
        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn logout(&self) -> AppResult<()> {
        if let Some(user) = self.repository.session_current().await {
            tracing::info!("User {} logged out", user.id);
        }
        self.repository.session_set(None).await
    }

    /// The signed-in actor, if any
    pub async fn current(&self) -> Option<User> {
        self.repository.session_current().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        error::AppError,
        models::Role,
        repository::test_support::*,
        storage::{Document, DocumentStore},
    };

    fn registration(name: &str, email: &str, password: &str) -> RegisterUser {
        RegisterUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: Some("0901234567".to_string()),
            address: None,
        }
    }

    #[tokio::test]
    async fn test_login_normalizes_email() {
        let customer = user("User1", Role::Customer);
        let (repository, _store) = repository_with(Document {
            users: vec![customer.clone()],
            ..Document::default()
        })
        .await;
        let sessions = SessionStore::new(repository);

        let actor = sessions
            .login("  USER1@Example.com ", "secret1")
            .await
            .unwrap();

        assert_eq!(actor.as_ref().map(|u| u.id), Some(customer.id));
        assert_eq!(sessions.current().await.map(|u| u.role), Some(Role::Customer));
    }

    #[tokio::test]
    async fn test_login_rejections_keep_session() {
        let customer = user("User1", Role::Customer);
        let (repository, _store) = repository_with(Document {
            users: vec![customer.clone()],
            ..Document::default()
        })
        .await;
        let sessions = SessionStore::new(repository);

        assert!(sessions.login("user1@example.com", "wrong").await.unwrap().is_none());
        assert!(sessions.login("user1@example.com", "").await.unwrap().is_none());
        assert!(sessions.login("user1", "secret1").await.unwrap().is_none());
        assert!(sessions.current().await.is_none());
    }

    #[tokio::test]
    async fn test_register_and_duplicate() {
        let (repository, _store) = repository_with(Document {
            users: vec![user("User1", Role::Customer)],
            ..Document::default()
        })
        .await;
        let sessions = SessionStore::new(repository.clone());

        let duplicate = sessions
            .register(registration("Other", "User1@Example.com", "secret1"))
            .await;
        assert!(matches!(duplicate, Err(AppError::DuplicateEmail(_))));

        let created = sessions
            .register(registration(" Lan ", " Lan@Example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(created.role, Role::Customer);
        assert_eq!(created.email, "lan@example.com");
        assert_eq!(sessions.current().await, Some(created));
        assert_eq!(repository.users_list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (repository, _store) = repository_with(Document::default()).await;
        let sessions = SessionStore::new(repository.clone());

        for data in [
            registration("  ", "lan@example.com", "secret1"),
            registration("Lan", "lan-at-example", "secret1"),
            registration("Lan", "lan@localhost", "secret1"),
            registration("Lan", "lan@example.com", "12345"),
        ] {
            let result = sessions.register(data).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
        assert!(repository.users_list().await.is_empty());
        assert!(sessions.current().await.is_none());
    }

    #[tokio::test]
    async fn test_registered_account_can_log_in() {
        let (repository, _store) = repository_with(Document::default()).await;
        let sessions = SessionStore::new(repository);

        let created = sessions
            .register(registration("Lan", " Lan@Example.com ", "secret1"))
            .await
            .unwrap();
        sessions.logout().await.unwrap();

        let actor = sessions.login("lan@example.com", "secret1").await.unwrap();
        assert_eq!(actor, Some(created.clone()));
        assert_eq!(sessions.current().await, Some(created));
    }

    #[tokio::test]
    async fn test_session_survives_reload() {
        let admin = user("Admin", Role::Admin);
        let (repository, store) = repository_with(Document {
            users: vec![admin.clone()],
            ..Document::default()
        })
        .await;
        let sessions = SessionStore::new(repository);
        sessions.login("admin@example.com", "secret1").await.unwrap();

        let reopened = Repository::open(store.clone() as Arc<dyn DocumentStore>)
            .await
            .unwrap();
        assert_eq!(SessionStore::new(reopened).current().await, Some(admin));

        let sessions = SessionStore::new(Repository::open(store.clone()).await.unwrap());
        sessions.logout().await.unwrap();
        assert!(store.read_all().await.unwrap().session.is_none());
    }
}
