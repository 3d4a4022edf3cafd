//! Liveness endpoints

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/test", get(hello))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello world".to_string(),
    })
}
