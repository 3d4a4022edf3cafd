//! Prioritization of caller-supplied task names

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;

use todocal_core::PrioritizedTask;

use crate::routes::{ApiError, ApiJson};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prioritize_tasks/", post(prioritize_tasks))
        .route("/prioritize_tasks", post(prioritize_tasks))
}

#[derive(Serialize)]
pub struct PrioritizeTasksResponse {
    pub prioritized_tasks: Vec<PrioritizedTask>,
}

/// POST /prioritize_tasks/ - Rank an arbitrary list of task names
async fn prioritize_tasks(
    State(state): State<AppState>,
    ApiJson(tasks): ApiJson<Vec<String>>,
) -> Result<Json<PrioritizeTasksResponse>, ApiError> {
    let prioritized_tasks = state.prioritizer.prioritize(&tasks).await?;

    Ok(Json(PrioritizeTasksResponse { prioritized_tasks }))
}
