//! Role and ownership permission checks.
//!
//! Every check is a pure function of the actor and the resource. The
//! `require_*` variants turn a failed check into an authorization error for
//! handlers.

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, Role, Toy, User},
};

/// Only the owner edits or deletes a toy
pub fn can_edit_toy(actor: &User, toy: &Toy) -> bool {
    actor.id == toy.owner_id
}

/// Admins and employees approve or reject any borrow request
pub fn can_approve_or_reject(actor: &User) -> bool {
    actor.role.is_staff()
}

/// Only admins see the full user list
pub fn can_list_all_users(actor: &User) -> bool {
    actor.role == Role::Admin
}

/// Staff, or the owner of the requested toy
pub fn can_decide_borrow(actor: &User, record: &BorrowRecord) -> bool {
    can_approve_or_reject(actor) || actor.id == record.owner_id
}

/// Staff, the toy owner, or the borrower
pub fn can_mark_returned(actor: &User, record: &BorrowRecord) -> bool {
    can_decide_borrow(actor, record) || actor.id == record.borrower_id
}

/// Staff see every borrow record and the dashboard counters
pub fn can_view_all_borrows(actor: &User) -> bool {
    actor.role.is_staff()
}

pub fn require_edit_toy(actor: &User, toy: &Toy) -> AppResult<()> {
    if can_edit_toy(actor, toy) {
        Ok(())
    } else {
        Err(AppError::Authorization("Only the owner can modify this toy".to_string()))
    }
}

pub fn require_list_all_users(actor: &User) -> AppResult<()> {
    if can_list_all_users(actor) {
        Ok(())
    } else {
        Err(AppError::Authorization("Administrator privileges required".to_string()))
    }
}

pub fn require_decide_borrow(actor: &User, record: &BorrowRecord) -> AppResult<()> {
    if can_decide_borrow(actor, record) {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Only staff or the toy owner can approve or reject this request".to_string(),
        ))
    }
}

pub fn require_mark_returned(actor: &User, record: &BorrowRecord) -> AppResult<()> {
    if can_mark_returned(actor, record) {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Not a party to this borrow".to_string(),
        ))
    }
}

pub fn require_view_all_borrows(actor: &User) -> AppResult<()> {
    if can_view_all_borrows(actor) {
        Ok(())
    } else {
        Err(AppError::Authorization("Staff privileges required".to_string()))
    }
}
