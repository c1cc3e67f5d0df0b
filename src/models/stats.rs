//! Dashboard statistics

use serde::Serialize;
use utoipa::ToSchema;

/// Counters shown on the staff dashboards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_toys: usize,
    pub available_toys: usize,
    pub active_borrows: usize,
    pub pending_requests: usize,
    pub customers: usize,
    pub employees: usize,
}
