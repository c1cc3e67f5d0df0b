//! Data models for Toybox

pub mod borrow;
pub mod stats;
pub mod toy;
pub mod user;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

// Re-export commonly used types
pub use borrow::{BorrowEvent, BorrowRecord, BorrowStatus, CreateBorrow};
pub use stats::DashboardStats;
pub use toy::{CreateToy, NewToy, Toy, ToyCondition, ToyQuery, UpdateToy};
pub use user::{RegisterUser, Role, UpdateUser, User, UserProfile};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// `local@domain.tld`, no whitespace; shared by login and registration
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn email_shape(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value) {
        return Err(ValidationError::new("email"));
    }
    Ok(())
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
