//! Business logic services

pub mod borrows;
pub mod sessions;
pub mod stats;
pub mod toys;
pub mod uploads;
pub mod users;

use crate::{config::UploadsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub sessions: sessions::SessionStore,
    pub toys: toys::ToysService,
    pub borrows: borrows::BorrowLedger,
    pub users: users::UsersService,
    pub stats: stats::StatsService,
    pub uploads: uploads::UploadsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, uploads_config: UploadsConfig) -> Self {
        Self {
            sessions: sessions::SessionStore::new(repository.clone()),
            toys: toys::ToysService::new(repository.clone()),
            borrows: borrows::BorrowLedger::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            uploads: uploads::UploadsService::new(uploads_config),
            repository,
        }
    }
}
