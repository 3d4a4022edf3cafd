//! Todo endpoints: today's prioritized calendar, the task list, task creation

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use todocal_core::{CalendarError, NewTask, PrioritizedTask, Task, TodayEvents};

use crate::routes::{ApiError, ApiJson};
use crate::state::AppState;

pub const NO_EVENTS_MESSAGE: &str = "No events found for today.";
pub const NO_TASKS_MESSAGE: &str = "No tasks available";
pub const CREATED_MESSAGE: &str = "Todo created";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get_todos", get(get_todos))
        .route("/todos", get(list_todos))
        .route("/todo/create", post(create_todo))
}

/// Response of GET /get_todos
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum TodosResponse {
    Message { message: String },
    Error { error: String },
    Todos { todos: Vec<PrioritizedTask> },
}

/// The calendar half of a create response: the provider's event, or why there isn't one.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum CalendarEventPayload {
    Created(Value),
    Failed { error: String },
}

impl From<Result<Value, CalendarError>> for CalendarEventPayload {
    fn from(result: Result<Value, CalendarError>) -> Self {
        match result {
            Ok(event) => CalendarEventPayload::Created(event),
            Err(e) => CalendarEventPayload::Failed {
                error: calendar_error_message(&e),
            },
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CreateTodoResponse {
    pub message: String,
    pub todo: Task,
    pub calendar_event: CalendarEventPayload,
}

fn calendar_error_message(err: &CalendarError) -> String {
    format!("An error occurred: {}", err)
}

/// GET /get_todos - Rank today's calendar events
async fn get_todos(State(state): State<AppState>) -> Result<Json<TodosResponse>, ApiError> {
    let events = match state.calendar.list_today().await {
        Ok(TodayEvents::NoEvents) => {
            return Ok(Json(TodosResponse::Message {
                message: NO_EVENTS_MESSAGE.to_string(),
            }));
        }
        Ok(TodayEvents::Events(events)) => events,
        Err(e) => {
            warn!(error = %e, "could not list today's events");
            return Ok(Json(TodosResponse::Error {
                error: calendar_error_message(&e),
            }));
        }
    };

    let task_names: Vec<String> = events.into_iter().map(|event| event.summary).collect();

    if task_names.is_empty() {
        return Ok(Json(TodosResponse::Message {
            message: NO_TASKS_MESSAGE.to_string(),
        }));
    }

    let todos = state.prioritizer.prioritize(&task_names).await?;

    Ok(Json(TodosResponse::Todos { todos }))
}

/// GET /todos - Tasks created since the server started
async fn list_todos(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store.list_all())
}

/// POST /todo/create - Record a todo and add it to the calendar
async fn create_todo(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewTask>,
) -> Json<CreateTodoResponse> {
    let task = req.into_task();
    state.store.append(task.clone());

    let calendar_event: CalendarEventPayload = state.calendar.create_event(&task).await.into();

    match &calendar_event {
        CalendarEventPayload::Created(_) => info!(id = %task.id, "todo created"),
        CalendarEventPayload::Failed { error } => {
            warn!(id = %task.id, %error, "todo stored but calendar insert failed")
        }
    }

    Json(CreateTodoResponse {
        message: CREATED_MESSAGE.to_string(),
        todo: task,
        calendar_event,
    })
}
