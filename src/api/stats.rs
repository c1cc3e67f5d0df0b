//! Dashboard statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::DashboardStats, policy};

use super::CurrentActor;

/// Counters for the admin and employee dashboards
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 403, description = "Staff only")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<DashboardStats>> {
    policy::require_view_all_borrows(&actor)?;
    Ok(Json(state.services.stats.dashboard().await))
}
