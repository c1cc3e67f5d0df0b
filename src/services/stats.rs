//! Dashboard counters

use crate::{
    models::{BorrowStatus, DashboardStats, Role},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> DashboardStats {
        let toys = self.repository.toys_list().await;

        DashboardStats {
            total_toys: toys.len(),
            available_toys: toys.iter().filter(|toy| toy.available).count(),
            active_borrows: self
                .repository
                .borrows_count_by_status(BorrowStatus::Active)
                .await,
            pending_requests: self
                .repository
                .borrows_count_by_status(BorrowStatus::Pending)
                .await,
            customers: self.repository.users_count_by_role(Role::Customer).await,
            employees: self.repository.users_count_by_role(Role::Employee).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{seed::default_document, test_support::repository_with};

    #[tokio::test]
    async fn test_dashboard_on_sample_data() {
        let (repository, _store) = repository_with(default_document()).await;

        let stats = StatsService::new(repository).dashboard().await;

        assert_eq!(
            stats,
            DashboardStats {
                total_toys: 3,
                available_toys: 2,
                active_borrows: 1,
                pending_requests: 0,
                customers: 3,
                employees: 1,
            }
        );
    }
}
