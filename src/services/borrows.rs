//! Borrow lifecycle: requests, decisions and returns

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::parse_calendar_date, BorrowEvent, BorrowRecord, BorrowStatus, CreateBorrow, User,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowLedger {
    repository: Repository,
}

impl BorrowLedger {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a pending borrow request and take the toy off the shelf.
    ///
    /// The new record and the toy's availability are written together.
    /// Failures are checked in order: missing toy, unavailable toy, own toy,
    /// then the dates.
    pub async fn request_borrow(&self, borrower: &User, request: CreateBorrow) -> AppResult<BorrowRecord> {
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        let record = self
            .repository
            .borrows_transaction(|toys, borrows| {
                let toy = toys
                    .iter_mut()
                    .find(|toy| toy.id == request.toy_id)
                    .ok_or_else(|| AppError::NotFound(format!("Toy {} not found", request.toy_id)))?;

                if !toy.available
                    || borrows
                        .iter()
                        .any(|b| b.toy_id == toy.id && b.status.is_open())
                {
                    return Err(AppError::Unavailable(toy.name.clone()));
                }
                if toy.owner_id == borrower.id {
                    return Err(AppError::SelfBorrow);
                }

                let (borrow_date, expected_return_date) = borrow_period(&request)?;

                let record = BorrowRecord {
                    id: Uuid::new_v4(),
                    toy_id: toy.id,
                    toy_name: toy.name.clone(),
                    toy_image_url: toy.image_url.clone(),
                    borrower_id: borrower.id,
                    borrower_name: borrower.name.clone(),
                    owner_id: toy.owner_id,
                    owner_name: toy.owner_name.clone(),
                    borrow_date,
                    expected_return_date,
                    actual_return_date: None,
                    status: BorrowStatus::Pending,
                    notes,
                };

                toy.available = false;
                toy.updated_at = Utc::now();
                borrows.push(record.clone());
                Ok(record)
            })
            .await;

        match record {
            Ok(record) => {
                tracing::info!(
                    "Borrow {} requested: toy {} by user {}",
                    record.id,
                    record.toy_id,
                    record.borrower_id
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!("Borrow request for toy {} refused: {}", request.toy_id, e);
                Err(e)
            }
        }
    }

    /// pending -> active
    pub async fn approve(&self, id: Uuid) -> AppResult<BorrowRecord> {
        self.apply_event(id, BorrowEvent::Approve).await
    }

    /// pending -> rejected, releasing the toy
    pub async fn reject(&self, id: Uuid) -> AppResult<BorrowRecord> {
        self.apply_event(id, BorrowEvent::Reject).await
    }

    /// active -> returned, releasing the toy and stamping the return time
    pub async fn mark_returned(&self, id: Uuid) -> AppResult<BorrowRecord> {
        self.apply_event(id, BorrowEvent::MarkReturned).await
    }

    async fn apply_event(&self, id: Uuid, event: BorrowEvent) -> AppResult<BorrowRecord> {
        let result = self
            .repository
            .borrows_transaction(|toys, borrows| {
                let record = borrows
                    .iter_mut()
                    .find(|record| record.id == id)
                    .ok_or_else(|| AppError::NotFound(format!("Borrow record {} not found", id)))?;

                let next = record.status.transition(event).ok_or_else(|| {
                    AppError::InvalidTransition {
                        from: record.status.to_string(),
                        event: event.to_string(),
                    }
                })?;

                record.status = next;
                if next == BorrowStatus::Returned {
                    record.actual_return_date = Some(Utc::now());
                }

                if next.is_terminal() {
                    // The toy may have been deleted by an earlier admin document replace
                    if let Some(toy) = toys.iter_mut().find(|toy| toy.id == record.toy_id) {
                        toy.available = true;
                        toy.updated_at = Utc::now();
                    }
                }

                Ok(record.clone())
            })
            .await;

        match result {
            Ok(record) => {
                tracing::info!("Borrow {} {} -> {}", record.id, event, record.status);
                Ok(record)
            }
            Err(e) => {
                tracing::warn!("Borrow {} {} refused: {}", id, event, e);
                Err(e)
            }
        }
    }

    /// Every borrow record
    pub async fn list_all(&self) -> Vec<BorrowRecord> {
        self.repository.borrows_list().await
    }

    /// Records where `user_id` is the borrower
    pub async fn list_by_borrower(&self, user_id: Uuid) -> Vec<BorrowRecord> {
        self.repository.borrows_list_by_borrower(user_id).await
    }

    /// Records for toys owned by `user_id`
    pub async fn list_for_owned_toys(&self, user_id: Uuid) -> Vec<BorrowRecord> {
        self.repository.borrows_list_for_owner(user_id).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BorrowRecord> {
        self.repository.borrows_get_by_id(id).await
    }
}

/// Parse the requested dates; the return must fall strictly after the start
fn borrow_period(request: &CreateBorrow) -> AppResult<(NaiveDate, NaiveDate)> {
    let borrow_date = match request.borrow_date.as_deref() {
        Some(value) => parse_calendar_date(value)?,
        None => Utc::now().date_naive(),
    };
    let expected_return_date = parse_calendar_date(&request.expected_return_date)?;
    if expected_return_date <= borrow_date {
        return Err(AppError::InvalidDate(format!(
            "Return date {} must be after borrow date {}",
            expected_return_date, borrow_date
        )));
    }
    Ok((borrow_date, expected_return_date))
}
