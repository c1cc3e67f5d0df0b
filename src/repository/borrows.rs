//! Borrow record domain methods on Repository

use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, BorrowStatus, Toy},
    storage::DocumentStore,
};

impl Repository {
    /// List every borrow record
    pub async fn borrows_list(&self) -> Vec<BorrowRecord> {
        self.borrows.snapshot().await
    }

    /// Borrow records where `user_id` is the borrower
    pub async fn borrows_list_by_borrower(&self, user_id: Uuid) -> Vec<BorrowRecord> {
        self.borrows
            .lock()
            .await
            .iter()
            .filter(|record| record.borrower_id == user_id)
            .cloned()
            .collect()
    }

    /// Borrow records for toys owned by `user_id`
    pub async fn borrows_list_for_owner(&self, user_id: Uuid) -> Vec<BorrowRecord> {
        self.borrows
            .lock()
            .await
            .iter()
            .filter(|record| record.owner_id == user_id)
            .cloned()
            .collect()
    }

    /// Get borrow record by ID
    pub async fn borrows_get_by_id(&self, id: Uuid) -> AppResult<BorrowRecord> {
        self.borrows
            .lock()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Borrow record {} not found", id)))
    }

    /// Count records per status
    pub async fn borrows_count_by_status(&self, status: BorrowStatus) -> usize {
        self.borrows
            .lock()
            .await
            .iter()
            .filter(|record| record.status == status)
            .count()
    }

    /// Run `f` against copies of the toys and borrows collections.
    ///
    /// When `f` succeeds both sections are written in one store call and then
    /// committed to memory. When `f` or the write fails nothing changes.
    pub async fn borrows_transaction<R, F>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<Toy>, &mut Vec<BorrowRecord>) -> AppResult<R>,
    {
        let mut toys = self.toys.lock().await;
        let mut borrows = self.borrows.lock().await;

        let mut next_toys = toys.clone();
        let mut next_borrows = borrows.clone();
        let result = f(&mut next_toys, &mut next_borrows)?;

        self.store
            .write_sections(vec![
                self.toys.encode(&next_toys)?,
                self.borrows.encode(&next_borrows)?,
            ])
            .await?;

        *toys = next_toys;
        *borrows = next_borrows;

        Ok(result)
    }
}
