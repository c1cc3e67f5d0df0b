//! Borrow record model and lifecycle states

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Borrow lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Pending,
    Active,
    Returned,
    Rejected,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Pending => "pending",
            BorrowStatus::Active => "active",
            BorrowStatus::Returned => "returned",
            BorrowStatus::Rejected => "rejected",
        }
    }

    /// Pending and active borrows hold the toy
    pub fn is_open(&self) -> bool {
        matches!(self, BorrowStatus::Pending | BorrowStatus::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_open()
    }

    /// Target state of `event`, or `None` when the event is not valid here
    pub fn transition(&self, event: BorrowEvent) -> Option<BorrowStatus> {
        match (self, event) {
            (BorrowStatus::Pending, BorrowEvent::Approve) => Some(BorrowStatus::Active),
            (BorrowStatus::Pending, BorrowEvent::Reject) => Some(BorrowStatus::Rejected),
            (BorrowStatus::Active, BorrowEvent::MarkReturned) => Some(BorrowStatus::Returned),
            _ => None,
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events that move a borrow record between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowEvent {
    Approve,
    Reject,
    MarkReturned,
}

impl BorrowEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowEvent::Approve => "approve",
            BorrowEvent::Reject => "reject",
            BorrowEvent::MarkReturned => "mark_returned",
        }
    }
}

impl std::fmt::Display for BorrowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Borrow record as persisted in the `borrows` collection.
///
/// Toy, borrower and owner names are snapshots taken when the request was
/// made; later edits to the toy or users do not touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BorrowRecord {
    pub id: Uuid,
    pub toy_id: Uuid,
    pub toy_name: String,
    pub toy_image_url: String,
    pub borrower_id: Uuid,
    pub borrower_name: String,
    pub owner_id: Uuid,
    pub owner_name: String,
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    pub notes: Option<String>,
}

/// Borrow request as received from a borrower
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBorrow {
    pub toy_id: Uuid,
    /// Calendar date (`YYYY-MM-DD` or RFC 3339); defaults to today
    pub borrow_date: Option<String>,
    /// Calendar date (`YYYY-MM-DD` or RFC 3339), strictly after the borrow date
    pub expected_return_date: String,
    pub notes: Option<String>,
}

/// Parse a calendar date from `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_calendar_date(value: &str) -> AppResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| AppError::InvalidDate(format!("Cannot parse date '{}'", value)))
}
